use crate::context::AppContext;
use crate::guard::Route;

/// Role chosen on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginRole {
    #[default]
    Customer,
    RestaurantAdmin,
}

impl LoginRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginRole::Customer => "customer",
            LoginRole::RestaurantAdmin => "restaurant_admin",
        }
    }

    /// Landing route after a successful login
    pub fn landing(&self) -> Route {
        match self {
            LoginRole::Customer => Route::Customer,
            LoginRole::RestaurantAdmin => Route::Admin,
        }
    }
}

/// Login screen controller
#[derive(Debug)]
pub struct LoginView {
    ctx: AppContext,
    role: LoginRole,
    error: Option<String>,
    loading: bool,
}

impl LoginView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            role: LoginRole::default(),
            error: None,
            loading: false,
        }
    }

    pub fn role(&self) -> LoginRole {
        self.role
    }

    pub fn set_role(&mut self, role: LoginRole) {
        self.role = role;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submit credentials; on success returns the route to navigate to
    ///
    /// The landing route follows the role picked on screen, not the role the
    /// backend returned. A mismatch is logged but not corrected here.
    pub async fn submit(&mut self, email: &str, password: &str) -> Option<Route> {
        self.error = None;
        self.loading = true;
        let result = self.ctx.session().login(email, password).await;
        self.loading = false;

        match result {
            Ok(user) => {
                if user.role != self.role.as_str() {
                    tracing::warn!(
                        user_id = user.id,
                        selected = self.role.as_str(),
                        actual = %user.role,
                        "Selected login role differs from account role"
                    );
                }
                Some(self.role.landing())
            }
            Err(failure) => {
                self.error = Some(failure.message);
                None
            }
        }
    }
}
