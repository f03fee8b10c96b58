//! Mock payment.

use shopfront_core::Identity;
use shopfront_store::{CartStore, CheckoutError, CheckoutForm, Persister, checkout};

/// Pay for the cart and place the order.
///
/// # Errors
///
/// Returns `CheckoutError` if the visitor is anonymous, the cart is empty, or
/// the form is incomplete.
pub fn pay<P: Persister>(
    store: &mut CartStore<P>,
    identity: &Identity,
    form: &CheckoutForm,
) -> Result<String, CheckoutError> {
    let receipt = checkout(store, identity, form)?;
    Ok(format!(
        "Order placed successfully!\n\
         Order #{} for {} ({} items) has been placed. \
         A confirmation email will be sent to {} shortly.",
        receipt.order_id,
        receipt.total.display(),
        receipt.item_count,
        receipt.email,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::cart;
    use shopfront_core::ProductId;
    use shopfront_store::{Catalog, MemoryPersister};

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip_code: "12345".to_string(),
            card_number: "4242424242424242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_pay() {
        let mut store = CartStore::load(MemoryPersister::new());
        cart::add(&mut store, &Catalog::builtin(), ProductId::new(2), 2).unwrap();

        let output = pay(&mut store, &Identity::signed_in("Ada"), &form()).unwrap();
        assert!(output.contains("for $298.00 (2 items)"));
        assert!(output.contains("sent to ada@example.com"));
        assert!(store.cart().is_empty());
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_pay_requires_sign_in() {
        let mut store = CartStore::load(MemoryPersister::new());
        cart::add(&mut store, &Catalog::builtin(), ProductId::new(2), 1).unwrap();

        assert_eq!(
            pay(&mut store, &Identity::anonymous(), &form()),
            Err(CheckoutError::NotAuthenticated)
        );
        assert_eq!(store.total_items(), 1);
    }
}
