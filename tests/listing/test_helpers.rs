//! Shared fixtures for listing BDD scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use list_sio_volumes::test_support::{
    ScriptedTransport, json_cinder_volumes, keystone_token_response,
};
use list_sio_volumes::{
    ListRequest, ListSummary, OpenStackSettings, ScaleIoSettings, TableLayout, list_volumes_with,
};
use rstest::fixture;
use tokio::runtime::Runtime;

const VOLUME_ENDPOINT: &str = "https://cinder.example:8776/v3/tenant";

#[derive(Clone, Debug)]
pub enum ListingOutcome {
    Success { summary: ListSummary, table: String },
    Failure(String),
}

impl ListingOutcome {
    /// Table rows without the header line.
    pub fn rows(&self) -> Vec<String> {
        match self {
            Self::Success { table, .. } => table.lines().skip(1).map(str::to_owned).collect(),
            Self::Failure(_) => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListingContext {
    pub openstack: ScriptedTransport,
    pub scaleio: ScriptedTransport,
    inventory: Arc<Mutex<Vec<(String, bool)>>>,
    keystone_rejects: Arc<Mutex<bool>>,
    outcome: Arc<Mutex<Option<ListingOutcome>>>,
}

#[fixture]
pub fn listing_context() -> ListingContext {
    ListingContext::default()
}

impl ListingContext {
    pub fn add_volume(&self, id: &str, attached: bool) {
        self.inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id.to_owned(), attached));
    }

    pub fn reject_keystone(&self) {
        *self
            .keystone_rejects
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Runs the listing and records its outcome for later steps.
    pub fn run(&self, layout: TableLayout) {
        let outcome = self.execute(layout);
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
    }

    /// Returns the recorded outcome of the last run.
    pub fn outcome(&self) -> Option<ListingOutcome> {
        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn execute(&self, layout: TableLayout) -> ListingOutcome {
        self.script_openstack();
        let runtime = Runtime::new().unwrap_or_else(|err| panic!("tokio runtime: {err}"));
        let mut out = Vec::new();
        let result = runtime.block_on(list_volumes_with(
            &request(layout),
            self.openstack.clone(),
            self.scaleio.clone(),
            &mut out,
        ));
        match result {
            Ok(summary) => ListingOutcome::Success {
                summary,
                table: String::from_utf8_lossy(&out).into_owned(),
            },
            Err(err) => ListingOutcome::Failure(err.to_string()),
        }
    }

    fn script_openstack(&self) {
        if *self
            .keystone_rejects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            self.openstack.push_response(
                401,
                r#"{"error":{"code":401,"message":"The request you have made requires authentication."}}"#,
            );
            return;
        }

        self.openstack
            .push(keystone_token_response("tok-bdd", VOLUME_ENDPOINT));
        let inventory = self
            .inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let entries = inventory
            .iter()
            .map(|(id, attached)| (id.as_str(), *attached))
            .collect::<Vec<_>>();
        self.openstack
            .push_response(200, json_cinder_volumes(&entries));
    }
}

fn request(layout: TableLayout) -> ListRequest {
    ListRequest {
        openstack: OpenStackSettings {
            auth_url: String::from("https://keystone.example:5000"),
            tenant: String::from("admin"),
            username: String::from("admin"),
            password: String::from("secret"),
            user_domain: String::from("Default"),
            project_domain: String::from("Default"),
            region: None,
        },
        scaleio: ScaleIoSettings {
            gateway: String::from("gw.example"),
            port: 443,
            username: String::from("admin"),
            password: String::from("Passw0rd"),
            insecure: false,
        },
        all_tenants: true,
        layout,
    }
}
