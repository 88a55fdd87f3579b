pub(crate) mod details;
pub(crate) mod gesture;
pub(crate) mod navigation;
pub(crate) mod statistics;

pub(crate) use details::DetailsView;
pub(crate) use gesture::{swipe_intent, Point, SwipeIntent};
pub(crate) use navigation::{Navigator, Params, Route};
pub(crate) use statistics::StatisticsView;

#[cfg(test)]
mod tests;
