use crate::app::state::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

/// Top navigation, bound to F1..Fn in this order.
pub fn nav_items(is_authenticated: bool) -> Vec<NavItem> {
    let mut items = vec![NavItem {
        title: "Burger Builder",
        route: Route::Builder,
    }];
    if is_authenticated {
        items.push(NavItem {
            title: "Orders",
            route: Route::Orders,
        });
        items.push(NavItem {
            title: "Logout",
            route: Route::Logout,
        });
    } else {
        items.push(NavItem {
            title: "Authenticate",
            route: Route::Auth,
        });
    }
    items
}

/// Tab to highlight for the current screen. Checkout has no tab of its own
/// and lights up the builder.
pub fn active_index(items: &[NavItem], route: Route) -> usize {
    let route = match route {
        Route::Checkout => Route::Builder,
        r => r,
    };
    items.iter().position(|i| i.route == route).unwrap_or(0)
}

/// Route bound to function key `n` (1-based), if any.
pub fn route_for_function_key(is_authenticated: bool, n: u8) -> Option<Route> {
    let index = usize::from(n.checked_sub(1)?);
    nav_items(is_authenticated).get(index).map(|i| i.route)
}
