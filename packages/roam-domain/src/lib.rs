pub mod criteria;
pub mod listing;
pub mod paginate;
pub mod placement;
pub mod query;
pub mod scroll;
pub mod viewport;
