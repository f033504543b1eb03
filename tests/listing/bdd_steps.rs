//! BDD step definitions for the listing workflow.

use list_sio_volumes::TableLayout;
use list_sio_volumes::test_support::json_scaleio_id;
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{ListingContext, ListingOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn recorded_outcome(listing_context: &ListingContext) -> Result<ListingOutcome, StepError> {
    listing_context
        .outcome()
        .ok_or_else(|| StepError::Assertion(String::from("missing outcome")))
}

fn row_at(outcome: &ListingOutcome, index: u32) -> Result<String, StepError> {
    let rows = outcome.rows();
    index
        .checked_sub(1)
        .and_then(|offset| rows.into_iter().nth(offset as usize))
        .ok_or_else(|| StepError::Assertion(format!("missing row {index} in {outcome:?}")))
}

#[given("an OpenStack inventory with attached volume \"{id}\"")]
fn inventory_with_attached_volume(listing_context: &ListingContext, id: String) {
    listing_context.add_volume(id.trim(), true);
}

#[given("an OpenStack inventory with detached volume \"{id}\"")]
fn inventory_with_detached_volume(listing_context: &ListingContext, id: String) {
    listing_context.add_volume(id.trim(), false);
}

#[given("Keystone rejects the credentials")]
fn keystone_rejects(listing_context: &ListingContext) {
    listing_context.reject_keystone();
}

#[given("the gateway requires a login first")]
fn gateway_requires_login(listing_context: &ListingContext) {
    listing_context.scaleio.push_response(401, "");
    listing_context
        .scaleio
        .push_response(200, json_scaleio_id("token-bdd"));
}

#[given("the gateway knows the next volume as \"{id}\"")]
fn gateway_knows_volume(listing_context: &ListingContext, id: String) {
    listing_context
        .scaleio
        .push_response(200, json_scaleio_id(id.trim()));
}

#[given("the gateway does not know the next volume")]
fn gateway_does_not_know_volume(listing_context: &ListingContext) {
    listing_context.scaleio.push_response(
        500,
        r#"{"message":"Could not find the volume","httpStatusCode":500,"errorCode":79}"#,
    );
}

#[given("the gateway is unreachable for the next volume")]
fn gateway_unreachable(listing_context: &ListingContext) {
    listing_context.scaleio.push_unreachable();
}

#[when("I list volumes in the detailed layout")]
fn list_detailed(listing_context: &ListingContext) {
    listing_context.run(TableLayout::Detailed);
}

#[when("I list volumes in the compact layout")]
fn list_compact(listing_context: &ListingContext) {
    listing_context.run(TableLayout::Compact);
}

#[then("the table has {rows:u32} rows")]
fn table_has_rows(listing_context: &ListingContext, rows: u32) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    let actual = outcome.rows().len();
    if actual == rows as usize {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {rows} rows, got {actual}: {outcome:?}"
        )))
    }
}

#[then("row {index:u32} maps volume \"{id}\" to name \"{name}\"")]
fn row_maps_volume(
    listing_context: &ListingContext,
    index: u32,
    id: String,
    name: String,
) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    let row = row_at(outcome, index)?;
    let mut cells = row.split_whitespace();
    if cells.next() == Some(id.trim()) && cells.next() == Some(name.trim()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "row {index} does not map {id} to {name}: {row:?}"
        )))
    }
}

#[then("row {index:u32} shows volume \"{id}\" with attached \"{flag}\"")]
fn row_shows_attachment(
    listing_context: &ListingContext,
    index: u32,
    id: String,
    flag: String,
) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    let row = row_at(outcome, index)?;
    let cells = row.split_whitespace().collect::<Vec<_>>();
    if cells.first() == Some(&id.trim()) && cells.last() == Some(&flag.trim()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "row {index} should show {id} with attached {flag}: {row:?}"
        )))
    }
}

#[then("the detailed table includes ScaleIO ID \"{id}\"")]
fn table_includes_id(listing_context: &ListingContext, id: String) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    if outcome
        .rows()
        .iter()
        .any(|row| row.split_whitespace().any(|cell| cell == id.trim()))
    {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "no row carries ScaleIO ID {id}: {outcome:?}"
        )))
    }
}

#[then("the gateway received {count:u32} login request")]
fn gateway_login_count(listing_context: &ListingContext, count: u32) -> Result<(), StepError> {
    let logins = listing_context.scaleio.count_gets_ending_with("/api/login");
    if logins == count as usize {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} login requests, got {logins}"
        )))
    }
}

#[then("the summary reports {failed:u32} failed lookup")]
fn summary_reports_failures(listing_context: &ListingContext, failed: u32) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    match outcome {
        ListingOutcome::Success { summary, .. } if summary.failed == failed as usize => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {failed} failed lookups, got {other:?}"
        ))),
    }
}

#[then("the listing fails mentioning \"{text}\"")]
fn listing_fails(listing_context: &ListingContext, text: String) -> Result<(), StepError> {
    let outcome = &recorded_outcome(listing_context)?;
    match outcome {
        ListingOutcome::Failure(message) if message.contains(text.trim()) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected failure mentioning {text}, got {other:?}"
        ))),
    }
}
