// Login and registration forms.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use zarin_api::{AuthResponse, Credentials, Registration};

use crate::error::CoreError;
use crate::route::Route;
use crate::router::Router;
use crate::session::Session;
use crate::views::catalog::InFlight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
}

const LOGIN_FIELDS: &[FormField] = &[FormField::Email, FormField::Password];
const REGISTER_FIELDS: &[FormField] = &[FormField::Name, FormField::Email, FormField::Password];

/// Form state plus a submitting flag.
///
/// A successful submit redirects to `/`. A failed one hands the error
/// back so the front end can raise its alert.
pub struct AuthForm {
    kind: AuthKind,
    name: String,
    email: String,
    password: String,
    focus: usize,
    submitting: Arc<watch::Sender<bool>>,
}

impl AuthForm {
    pub fn new(kind: AuthKind) -> Self {
        let (submitting, _) = watch::channel(false);
        Self {
            kind,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: 0,
            submitting: Arc::new(submitting),
        }
    }

    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            AuthKind::Login => LOGIN_FIELDS,
            AuthKind::Register => REGISTER_FIELDS,
        }
    }

    pub fn focused(&self) -> FormField {
        self.fields()
            .get(self.focus)
            .copied()
            .unwrap_or(FormField::Email)
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    /// Mutable access to the focused field's text.
    pub fn input(&mut self) -> &mut String {
        match self.focused() {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Submit the form through `session`.
    ///
    /// Returns [`CoreError::Busy`] without sending anything while a
    /// previous submit is still running. On success the router is
    /// redirected to `/` and the full server payload is returned.
    pub fn submit(
        &self,
        session: &Session,
        router: &Router,
    ) -> impl Future<Output = Result<AuthResponse, CoreError>> + Send + use<> {
        let guard = InFlight::claim(&self.submitting);
        let session = session.clone();
        let router = router.clone();
        let request = match self.kind {
            AuthKind::Login => Request::Login(Credentials::new(
                self.email.trim(),
                self.password.clone(),
            )),
            AuthKind::Register => Request::Register(Registration::new(
                self.name.trim(),
                self.email.trim(),
                self.password.clone(),
            )),
        };

        async move {
            let Some(_guard) = guard else {
                return Err(CoreError::Busy {
                    operation: "sign-in",
                });
            };
            let response = match request {
                Request::Login(credentials) => session.login(&credentials).await?,
                Request::Register(registration) => session.register(&registration).await?,
            };
            router.redirect(Route::Home);
            Ok(response)
        }
    }
}

enum Request {
    Login(Credentials),
    Register(Registration),
}
