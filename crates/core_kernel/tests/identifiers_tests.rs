//! Unit tests for the Identifiers module

use core_kernel::{CustomerId, InvoiceId, LineItemId};
use uuid::Uuid;

mod invoice_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(InvoiceId::new(), InvoiceId::new());
    }

    #[test]
    fn test_new_ids_are_time_ordered() {
        let first = InvoiceId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = InvoiceId::new();

        let a: Uuid = first.into();
        let b: Uuid = second.into();
        assert!(a < b);
    }

    #[test]
    fn test_display_has_prefix() {
        let id = InvoiceId::new();
        assert!(id.to_string().starts_with("INV-"));
        assert_eq!(id.to_string().len(), "INV-".len() + 36);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = InvoiceId::new();
        let with_prefix: InvoiceId = id.to_string().parse().unwrap();
        let bare: InvoiceId = id.as_uuid().to_string().parse().unwrap();

        assert_eq!(with_prefix, id);
        assert_eq!(bare, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("INV-not-a-uuid".parse::<InvoiceId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::now_v7();
        let id = InvoiceId::from(uuid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod other_ids {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert!(LineItemId::new().to_string().starts_with("LINE-"));
        assert!(CustomerId::new().to_string().starts_with("CUS-"));
    }

    #[test]
    fn test_customer_prefix_is_not_accepted_for_lines() {
        let customer = CustomerId::new().to_string();
        assert!(customer.parse::<LineItemId>().is_err());
    }

    #[test]
    fn test_default_creates_fresh_id() {
        assert_ne!(LineItemId::default(), LineItemId::default());
    }
}
