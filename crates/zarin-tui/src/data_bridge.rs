//! Data bridge: forwards the storefront's shared `watch` state into the
//! action loop.
//!
//! Route, session, navigation tree, and cart badge each become an
//! [`Action`] whenever they change. Per-view data is not forwarded;
//! screens read their view's snapshot at render time.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use zarin_core::Storefront;

use crate::action::Action;

pub async fn spawn_data_bridge(
    store: Storefront,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut history = store.router().subscribe();
    let mut session = store.session().subscribe();
    let mut navigation = store.navigation();
    let mut badge = store.cart_badge();

    // Initial snapshots so the first frame is current.
    let _ = action_tx.send(Action::RouteChanged(
        history.borrow_and_update().current().clone(),
    ));
    let _ = action_tx.send(Action::SessionChanged(session.borrow_and_update().clone()));
    let _ = action_tx.send(Action::NavigationUpdated(
        navigation.borrow_and_update().clone(),
    ));
    let _ = action_tx.send(Action::CartBadgeUpdated(*badge.borrow_and_update()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = history.changed() => {
                let route = history.borrow_and_update().current().clone();
                debug!(path = %route, "dispatching RouteChanged");
                let _ = action_tx.send(Action::RouteChanged(route));
            }
            Ok(()) = session.changed() => {
                let state = session.borrow_and_update().clone();
                let _ = action_tx.send(Action::SessionChanged(state));
            }
            Ok(()) = navigation.changed() => {
                let tree = navigation.borrow_and_update().clone();
                let _ = action_tx.send(Action::NavigationUpdated(tree));
            }
            Ok(()) = badge.changed() => {
                let count = *badge.borrow_and_update();
                let _ = action_tx.send(Action::CartBadgeUpdated(count));
            }
        }
    }

    debug!("data bridge shut down");
}
