pub mod api_keys;
pub mod orders;
pub mod placements;
pub mod subscriptions;
