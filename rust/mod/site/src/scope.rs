//! Per-route live subscriptions.
//!
//! Entering a route tears down the previous route's subscriptions first and
//! only then opens the new ones, so a page never receives snapshots after
//! it has been left.

use std::sync::{Arc, Mutex};

use studio_flux::StateStore;
use studio_gallery::GalleryStore;
use studio_gallery::reviews::marquee_query;
use studio_store::{Query, Subscription};
use tracing::debug;

use crate::routes::{LiveView, Route};
use crate::views;

struct Active {
    route: Route,
    subscriptions: Vec<Subscription>,
}

#[derive(Default)]
pub struct ViewScope {
    active: Mutex<Option<Active>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&self, route: Route, gallery: &GalleryStore, store: &Arc<StateStore>) {
        let mut active = self.active.lock().unwrap();
        if let Some(prev) = active.take() {
            debug!(route = prev.route.path(), count = prev.subscriptions.len(), "detaching live views");
            drop(prev.subscriptions);
        }

        let mut subscriptions = Vec::new();
        for view in route.live_views() {
            match view {
                LiveView::Categories => {
                    let store = Arc::clone(store);
                    subscriptions.push(
                        gallery
                            .categories
                            .watch(Query::all(), move |snap| views::on_categories(&store, snap)),
                    );
                }
                LiveView::Photos => {
                    let store = Arc::clone(store);
                    subscriptions.push(
                        gallery
                            .photos
                            .watch(Query::all(), move |snap| views::on_photos(&store, snap)),
                    );
                }
                LiveView::Reviews => {
                    let all = Arc::clone(store);
                    subscriptions.push(
                        gallery
                            .reviews
                            .watch(Query::all(), move |snap| views::on_reviews(&all, snap)),
                    );
                    let newest = Arc::clone(store);
                    subscriptions.push(
                        gallery
                            .reviews
                            .watch(marquee_query(), move |snap| views::on_marquee(&newest, snap)),
                    );
                }
            }
        }
        debug!(route = route.path(), count = subscriptions.len(), "live views attached");
        *active = Some(Active {
            route,
            subscriptions,
        });
    }

    pub fn deactivate(&self) {
        self.active.lock().unwrap().take();
    }

    pub fn route(&self) -> Option<Route> {
        self.active.lock().unwrap().as_ref().map(|a| a.route)
    }

    pub fn subscription_count(&self) -> usize {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map_or(0, |a| a.subscriptions.len())
    }
}
