//! BDD scenarios for the listing workflow.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ListingContext, listing_context};

#[scenario(
    path = "tests/features/listing.feature",
    name = "List matched volumes with their ScaleIO IDs"
)]
fn scenario_list_matched(listing_context: ListingContext) {
    drop(listing_context);
}

#[scenario(
    path = "tests/features/listing.feature",
    name = "Skip volumes without a ScaleIO counterpart"
)]
fn scenario_skip_unmatched(listing_context: ListingContext) {
    drop(listing_context);
}

#[scenario(
    path = "tests/features/listing.feature",
    name = "Keep listing when the gateway drops a lookup"
)]
fn scenario_gateway_drop(listing_context: ListingContext) {
    drop(listing_context);
}

#[scenario(
    path = "tests/features/listing.feature",
    name = "Abort when Keystone rejects the credentials"
)]
fn scenario_keystone_rejects(listing_context: ListingContext) {
    drop(listing_context);
}
