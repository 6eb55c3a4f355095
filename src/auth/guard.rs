use crate::database::StoreError;
use crate::middleware::AuthUser;

/// Anything that belongs to a user, directly or through its parent.
pub trait Owned {
    /// Owning user id, or `None` when ownership cannot be resolved
    /// (for example an item whose container was not hydrated).
    fn owner_id(&self) -> Option<i64>;
}

/// Fail with `Forbidden` unless `principal` owns `resource`.
pub fn ensure_owner<R: Owned + ?Sized>(
    principal: &AuthUser,
    resource: &R,
    action: &str,
) -> Result<(), StoreError> {
    match resource.owner_id() {
        Some(owner) if owner == principal.user_id => Ok(()),
        _ => {
            tracing::warn!("User {} denied: {}", principal.user_id, action);
            Err(StoreError::forbidden(format!("Not allowed to {}.", action)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Thing(Option<i64>);

    impl Owned for Thing {
        fn owner_id(&self) -> Option<i64> {
            self.0
        }
    }

    fn principal(id: i64) -> AuthUser {
        AuthUser { user_id: id, uuid: Uuid::new_v4() }
    }

    #[test]
    fn owner_passes() {
        assert!(ensure_owner(&principal(3), &Thing(Some(3)), "edit this thing").is_ok());
    }

    #[test]
    fn stranger_and_unresolved_owner_are_forbidden() {
        let err = ensure_owner(&principal(3), &Thing(Some(4)), "edit this thing").unwrap_err();
        assert_eq!(err.to_string(), "Forbidden: Not allowed to edit this thing.");
        assert!(matches!(
            ensure_owner(&principal(3), &Thing(None), "edit this thing"),
            Err(StoreError::Forbidden(_))
        ));
    }
}
