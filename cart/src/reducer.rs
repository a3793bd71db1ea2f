//! Reducer logic for the cart.
//!
//! Every mutation keeps two invariants: product ids are unique across the
//! item list, and no item is ever stored with quantity 0.

use crate::types::{CartItem, CartState, ProductId, ProductSummary};
use serde::{Deserialize, Serialize};
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Actions the view layer can send to the cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    /// Add one unit of a product
    ///
    /// Increments the quantity when the product is already in the cart;
    /// otherwise appends a new line item. Always succeeds.
    Add {
        /// The product being added
        product: ProductSummary,
    },

    /// Set the quantity of a line item
    ///
    /// A quantity of 0 removes the item. Unknown ids are ignored.
    SetQuantity {
        /// Product to update
        id: ProductId,
        /// New quantity
        quantity: u32,
    },

    /// Remove a line item
    ///
    /// Unknown ids are ignored.
    Remove {
        /// Product to remove
        id: ProductId,
    },

    /// Empty the cart
    ///
    /// Sent by the checkout orchestrator after a completed purchase, or by
    /// the shopper abandoning one.
    Clear,
}

/// Reducer for the cart
///
/// Pure state mutation: no environment, no effects. The view layer is
/// notified through the store's action broadcast.
#[derive(Clone, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::Add { product } => {
                if let Some(item) = state.items.iter_mut().find(|item| item.id == product.id) {
                    item.quantity += 1;
                } else {
                    state.items.push(CartItem::new(product));
                }
            },

            CartAction::SetQuantity { id, quantity } => {
                if quantity == 0 {
                    state.items.retain(|item| item.id != id);
                } else if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                    item.quantity = quantity;
                }
            },

            CartAction::Remove { id } => {
                state.items.retain(|item| item.id != id);
            },

            CartAction::Clear => {
                state.items.clear();
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Money;
    use storefront_testing::{ReducerTest, assertions};

    fn summary(id: u64, price_rupees: u64) -> ProductSummary {
        ProductSummary {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Money::from_rupees(price_rupees),
            image_url: format!("https://cdn.example.com/p/{id}.jpg"),
        }
    }

    #[test]
    fn add_new_product_appends_with_quantity_one() {
        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.quantity_of(ProductId::new(1)), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn add_same_product_twice_increments_quantity() {
        let state = ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .run();

        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .then_state(|state| {
                // One line item with quantity 2, not two line items
                assert_eq!(state.len(), 1);
                assert_eq!(state.quantity_of(ProductId::new(1)), 2);
                assert_eq!(state.total(), Money::from_rupees(1000));
            })
            .run();
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut state = CartState::new();
        let reducer = CartReducer::new();
        for id in [3, 1, 2] {
            reducer.reduce(
                &mut state,
                CartAction::Add {
                    product: summary(id, 100),
                },
                &(),
            );
        }

        let ids: Vec<u64> = state.items.iter().map(|item| item.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn set_quantity_updates_matching_item() {
        let state = ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .run();

        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(CartAction::SetQuantity {
                id: ProductId::new(1),
                quantity: 4,
            })
            .then_state(|state| {
                assert_eq!(state.quantity_of(ProductId::new(1)), 4);
                assert_eq!(state.total(), Money::from_rupees(2000));
            })
            .run();
    }

    #[test]
    fn set_quantity_zero_removes_item() {
        let state = ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .run();

        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(CartAction::SetQuantity {
                id: ProductId::new(1),
                quantity: 0,
            })
            .then_state(|state| {
                assert!(state.is_empty());
            })
            .run();
    }

    #[test]
    fn set_quantity_unknown_id_is_a_noop() {
        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::SetQuantity {
                id: ProductId::new(9),
                quantity: 3,
            })
            .then_state(|state| {
                assert!(state.is_empty());
            })
            .run();
    }

    #[test]
    fn remove_deletes_only_the_matching_item() {
        let mut state = CartState::new();
        let reducer = CartReducer::new();
        for id in [1, 2] {
            reducer.reduce(
                &mut state,
                CartAction::Add {
                    product: summary(id, 100),
                },
                &(),
            );
        }

        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(CartAction::Remove {
                id: ProductId::new(1),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.quantity_of(ProductId::new(2)), 1);
            })
            .run();
    }

    #[test]
    fn clear_empties_the_cart() {
        let state = ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(CartState::new())
            .when_action(CartAction::Add {
                product: summary(1, 500),
            })
            .run();

        ReducerTest::new(CartReducer::new())
            .with_env(())
            .given_state(state)
            .when_action(CartAction::Clear)
            .then_state(|state| {
                assert!(state.is_empty());
                assert!(state.total().is_zero());
            })
            .run();
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Add(u64),
            SetQuantity(u64, u32),
            Remove(u64),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..8u64).prop_map(Op::Add),
                ((0..8u64), (0..5u32)).prop_map(|(id, quantity)| Op::SetQuantity(id, quantity)),
                (0..8u64).prop_map(Op::Remove),
            ]
        }

        /// Reference model: `(id, quantity)` pairs in insertion order.
        fn apply_to_model(model: &mut Vec<(u64, u32)>, op: &Op) {
            match *op {
                Op::Add(id) => {
                    if let Some(entry) = model.iter_mut().find(|(i, _)| *i == id) {
                        entry.1 += 1;
                    } else {
                        model.push((id, 1));
                    }
                },
                Op::SetQuantity(id, 0) | Op::Remove(id) => {
                    model.retain(|(i, _)| *i != id);
                },
                Op::SetQuantity(id, quantity) => {
                    if let Some(entry) = model.iter_mut().find(|(i, _)| *i == id) {
                        entry.1 = quantity;
                    }
                },
            }
        }

        proptest! {
            #[test]
            fn cart_matches_model_for_any_op_sequence(
                ops in proptest::collection::vec(op_strategy(), 0..64)
            ) {
                let reducer = CartReducer::new();
                let mut state = CartState::new();
                let mut model: Vec<(u64, u32)> = Vec::new();

                for op in &ops {
                    let action = match *op {
                        Op::Add(id) => CartAction::Add { product: summary(id, id + 1) },
                        Op::SetQuantity(id, quantity) => CartAction::SetQuantity {
                            id: ProductId::new(id),
                            quantity,
                        },
                        Op::Remove(id) => CartAction::Remove { id: ProductId::new(id) },
                    };
                    reducer.reduce(&mut state, action, &());
                    apply_to_model(&mut model, op);

                    // No item is ever persisted with quantity 0
                    prop_assert!(state.items.iter().all(|item| item.quantity >= 1));

                    // Ids stay unique
                    let mut ids: Vec<u64> =
                        state.items.iter().map(|item| item.id.value()).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), state.len());

                    // Total is exactly the sum over current items
                    let expected: Money =
                        state.items.iter().map(|item| item.price * item.quantity).sum();
                    prop_assert_eq!(state.total(), expected);
                }

                // Final items match the reference model, order included
                let flattened: Vec<(u64, u32)> = state
                    .items
                    .iter()
                    .map(|item| (item.id.value(), item.quantity))
                    .collect();
                prop_assert_eq!(flattened, model);
            }
        }
    }
}
