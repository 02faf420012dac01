use serde::{Deserialize, Serialize};

/// Collections a page keeps live while it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiveView {
    Categories,
    Photos,
    Reviews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    About,
    Contact,
    Movements,
    AdminLogin,
    AdminDashboard,
}

impl Route {
    /// Unknown paths land on the home page. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/about" => Route::About,
            "/contact" => Route::Contact,
            "/movements" => Route::Movements,
            "/admin" => Route::AdminLogin,
            "/admin/dashboard" => Route::AdminDashboard,
            _ => Route::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Movements => "/movements",
            Route::AdminLogin => "/admin",
            Route::AdminDashboard => "/admin/dashboard",
        }
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Route::AdminDashboard)
    }

    /// Where navigation actually ends up given whether an admin session is
    /// live.
    pub fn guard(self, signed_in: bool) -> Self {
        if self.requires_admin() && !signed_in {
            Route::AdminLogin
        } else {
            self
        }
    }

    pub fn live_views(self) -> &'static [LiveView] {
        match self {
            Route::Movements => &[LiveView::Categories, LiveView::Photos],
            Route::About => &[LiveView::Reviews],
            Route::AdminDashboard => &[LiveView::Categories, LiveView::Photos, LiveView::Reviews],
            Route::Home | Route::Contact | Route::AdminLogin => &[],
        }
    }
}
