/// The principal behind a callable invocation, as established by the auth layer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CallerIdentity {
    #[default]
    Anonymous,
    Authenticated {
        uid: String,
        email: Option<String>,
    },
}

impl CallerIdentity {
    pub fn authenticated(uid: impl Into<String>) -> Self {
        CallerIdentity::Authenticated {
            uid: uid.into(),
            email: None,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            CallerIdentity::Authenticated { uid, .. } => Some(uid),
            CallerIdentity::Anonymous => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            CallerIdentity::Authenticated { email, .. } => email.as_deref(),
            CallerIdentity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, CallerIdentity::Authenticated { .. })
    }
}
