use rust_decimal::Decimal;

use crate::models::{InventoryError, SupplyStatus, TransactionType};

/// Threshold rule for the derived stock status, evaluated in fixed order:
/// the zero check comes first, so an item at exactly zero is out of stock
/// even when the minimum threshold is also zero.
pub fn derive_status(quantity: Decimal, minimum: Decimal) -> SupplyStatus {
    if quantity <= Decimal::ZERO {
        SupplyStatus::OutOfStock
    } else if quantity <= minimum {
        SupplyStatus::LowStock
    } else {
        SupplyStatus::InStock
    }
}

/// Applies one transaction to an on-hand quantity and recomputes the
/// status. Only RECEIVED and ISSUED move the quantity; the remaining
/// kinds are recorded as transactions but leave it untouched.
pub fn apply_transaction(
    quantity: Decimal,
    minimum: Decimal,
    kind: TransactionType,
    amount: Decimal,
) -> Result<(Decimal, SupplyStatus), InventoryError> {
    let quantity_after = match kind {
        TransactionType::Received => quantity + amount,
        TransactionType::Issued => {
            if quantity < amount {
                return Err(InventoryError::InsufficientStock {
                    available: quantity,
                    requested: amount,
                });
            }
            quantity - amount
        }
        TransactionType::Adjusted
        | TransactionType::Returned
        | TransactionType::Expired
        | TransactionType::Damaged => quantity,
    };

    Ok((quantity_after, derive_status(quantity_after, minimum)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn below_minimum_is_low_stock() {
        assert_eq!(derive_status(d(5), d(10)), SupplyStatus::LowStock);
    }

    #[test]
    fn zero_is_out_of_stock_even_with_zero_minimum() {
        assert_eq!(derive_status(d(0), d(0)), SupplyStatus::OutOfStock);
        assert_eq!(derive_status(d(0), d(10)), SupplyStatus::OutOfStock);
    }

    #[test]
    fn above_minimum_is_in_stock() {
        assert_eq!(derive_status(d(11), d(10)), SupplyStatus::InStock);
    }

    #[test]
    fn at_minimum_is_low_stock() {
        assert_eq!(derive_status(d(10), d(10)), SupplyStatus::LowStock);
    }

    #[test]
    fn receiving_adds_and_rederives() {
        let (after, status) =
            apply_transaction(d(0), d(5), TransactionType::Received, d(10)).unwrap();
        assert_eq!(after, d(10));
        assert_eq!(status, SupplyStatus::InStock);
    }

    #[test]
    fn issuing_subtracts() {
        let (after, status) =
            apply_transaction(d(12), d(10), TransactionType::Issued, d(3)).unwrap();
        assert_eq!(after, d(9));
        assert_eq!(status, SupplyStatus::LowStock);
    }

    #[test]
    fn issuing_to_exactly_zero_is_out_of_stock() {
        let (after, status) =
            apply_transaction(d(5), d(0), TransactionType::Issued, d(5)).unwrap();
        assert_eq!(after, d(0));
        assert_eq!(status, SupplyStatus::OutOfStock);
    }

    #[test]
    fn issuing_more_than_on_hand_fails_without_mutation() {
        let err = apply_transaction(d(5), d(10), TransactionType::Issued, d(6)).unwrap_err();
        match err {
            InventoryError::InsufficientStock {
                available,
                requested,
            } => {
                assert_eq!(available, d(5));
                assert_eq!(requested, d(6));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_quantity_kinds_are_recorded_only() {
        for kind in [
            TransactionType::Adjusted,
            TransactionType::Returned,
            TransactionType::Expired,
            TransactionType::Damaged,
        ] {
            let (after, status) = apply_transaction(d(7), d(10), kind, d(3)).unwrap();
            assert_eq!(after, d(7));
            assert_eq!(status, SupplyStatus::LowStock);
        }
    }
}
