use serde::Deserialize;
use uuid::Uuid;

/// Billing provider event names form a closed set; anything the provider
/// adds later lands in `Unrecognized` and is acknowledged as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WebhookEvent {
    #[serde(rename = "user.upgraded")]
    UserUpgraded,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub event: WebhookEvent,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_event_parses() {
        let p: WebhookPayload = serde_json::from_str(
            r#"{"event":"user.upgraded","data":{"user_id":"c4c2bba1-77b4-4bef-a8bd-60ac43e0d7a3"}}"#,
        )
        .unwrap();
        assert_eq!(p.event, WebhookEvent::UserUpgraded);
    }

    #[test]
    fn unknown_event_maps_to_unrecognized() {
        let p: WebhookPayload = serde_json::from_str(
            r#"{"event":"user.downgraded","data":{"user_id":"c4c2bba1-77b4-4bef-a8bd-60ac43e0d7a3"}}"#,
        )
        .unwrap();
        assert_eq!(p.event, WebhookEvent::Unrecognized);
    }
}
