//! Process-wide observable of the signed-in identity.
//!
//! The identity provider integration publishes into an [`IdentityWatch`] when
//! its sign-in flow completes or the session ends; consumers read the current
//! value at decision points and hold an [`IdentitySubscription`] to learn
//! about changes. Dropping a subscription unsubscribes it.

use std::sync::Arc;

use pushkind_common::domain::auth::AuthenticatedUser;
use tokio::sync::watch;

/// Current identity, or `None` when signed out.
pub type CurrentIdentity = Option<AuthenticatedUser>;

#[derive(Clone)]
pub struct IdentityWatch {
    sender: Arc<watch::Sender<CurrentIdentity>>,
}

impl Default for IdentityWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityWatch {
    /// Start signed out.
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> CurrentIdentity {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish the identity produced by a completed sign-in flow.
    pub fn sign_in(&self, user: AuthenticatedUser) {
        self.sender.send_replace(Some(user));
    }

    /// Invalidate the local session.
    pub fn sign_out(&self) {
        self.sender.send_replace(None);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Change notifications for an [`IdentityWatch`].
pub struct IdentitySubscription {
    receiver: watch::Receiver<CurrentIdentity>,
}

impl IdentitySubscription {
    pub fn current(&self) -> CurrentIdentity {
        self.receiver.borrow().clone()
    }

    /// Return the new identity if it changed since the last observation.
    ///
    /// Never blocks. Returns `None` when nothing changed or the watch is gone.
    pub fn poll_change(&mut self) -> Option<CurrentIdentity> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Wait for the next identity change.
    ///
    /// Resolves to `None` once every [`IdentityWatch`] handle is dropped.
    pub async fn changed(&mut self) -> Option<CurrentIdentity> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(sub: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: sub.into(),
            email: "test@example.com".into(),
            hub_id: 1,
            name: "Test".into(),
            roles: vec![],
            exp: 0,
        }
    }

    fn subject(identity: &CurrentIdentity) -> Option<&str> {
        identity.as_ref().map(|user| user.sub.as_str())
    }

    #[test]
    fn starts_signed_out() {
        let watch = IdentityWatch::new();
        assert!(watch.current().is_none());
    }

    #[test]
    fn subscription_sees_sign_in_and_sign_out() {
        let watch = IdentityWatch::new();
        let mut subscription = watch.subscribe();
        assert!(subscription.poll_change().is_none());

        watch.sign_in(sample_user("u1"));
        let change = subscription.poll_change().unwrap();
        assert_eq!(subject(&change), Some("u1"));
        assert!(subscription.poll_change().is_none());

        watch.sign_out();
        let change = subscription.poll_change().unwrap();
        assert!(change.is_none());
        assert!(subscription.current().is_none());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let watch = IdentityWatch::new();
        let first = watch.subscribe();
        let second = watch.subscribe();
        assert_eq!(watch.subscriber_count(), 2);

        drop(first);
        assert_eq!(watch.subscriber_count(), 1);
        drop(second);
        assert_eq!(watch.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn changed_resolves_on_sign_in() {
        let watch = IdentityWatch::new();
        let mut subscription = watch.subscribe();

        let publisher = watch.clone();
        tokio::spawn(async move {
            publisher.sign_in(sample_user("u2"));
        });

        let next = subscription.changed().await.unwrap();
        assert_eq!(subject(&next), Some("u2"));
    }

    #[tokio::test]
    async fn changed_ends_when_watch_is_dropped() {
        let watch = IdentityWatch::new();
        let mut subscription = watch.subscribe();
        drop(watch);
        assert!(subscription.changed().await.is_none());
    }
}
