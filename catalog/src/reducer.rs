//! Reducer logic for the catalog.

use crate::error::CatalogError;
use crate::providers::ProductCatalog;
use crate::types::{CatalogState, Product};
use std::sync::Arc;
use storefront_cart::ProductId;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Actions for the catalog (view intents and load results)
#[derive(Clone, Debug)]
pub enum CatalogAction {
    // ========== Commands ==========
    /// Command: Load the product list, optionally filtered by category
    LoadProducts {
        /// Category filter (`None` for all products)
        category: Option<String>,
    },

    /// Command: Load a single product for the detail view
    LoadProduct {
        /// Product to load
        id: ProductId,
    },

    /// Command: Load the category labels
    LoadCategories,

    // ========== Events ==========
    /// Event: Product list arrived
    ProductsLoaded {
        /// Products for the requested filter
        products: Vec<Product>,
    },

    /// Event: Product detail arrived
    ProductLoaded {
        /// The requested product
        product: Product,
    },

    /// Event: Category labels arrived
    CategoriesLoaded {
        /// Category labels, "All" first
        categories: Vec<String>,
    },

    /// Event: A load failed
    LoadFailed {
        /// What went wrong
        error: CatalogError,
    },
}

/// Environment dependencies for the catalog reducer
#[derive(Clone)]
pub struct CatalogEnvironment {
    /// Catalog API client
    pub catalog: Arc<dyn ProductCatalog>,
}

impl CatalogEnvironment {
    /// Creates a new `CatalogEnvironment`
    #[must_use]
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }
}

/// Reducer for the catalog
#[derive(Clone, Debug, Default)]
pub struct CatalogReducer;

impl CatalogReducer {
    /// Creates a new `CatalogReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CatalogAction::LoadProducts { category } => {
                state.loading = true;
                state.last_error = None;
                state.category_filter = category.clone();

                let catalog = Arc::clone(&env.catalog);
                smallvec![Effect::future(async move {
                    Some(match catalog.fetch_products(category).await {
                        Ok(products) => CatalogAction::ProductsLoaded { products },
                        Err(error) => CatalogAction::LoadFailed { error },
                    })
                })]
            },

            CatalogAction::LoadProduct { id } => {
                state.loading = true;
                state.last_error = None;

                let catalog = Arc::clone(&env.catalog);
                smallvec![Effect::future(async move {
                    Some(match catalog.fetch_product(id).await {
                        Ok(product) => CatalogAction::ProductLoaded { product },
                        Err(error) => CatalogAction::LoadFailed { error },
                    })
                })]
            },

            CatalogAction::LoadCategories => {
                let catalog = Arc::clone(&env.catalog);
                smallvec![Effect::future(async move {
                    Some(match catalog.fetch_categories().await {
                        Ok(categories) => CatalogAction::CategoriesLoaded { categories },
                        Err(error) => CatalogAction::LoadFailed { error },
                    })
                })]
            },

            CatalogAction::ProductsLoaded { products } => {
                state.loading = false;
                state.products = products;
                SmallVec::new()
            },

            CatalogAction::ProductLoaded { product } => {
                state.loading = false;
                state.selected = Some(product);
                SmallVec::new()
            },

            CatalogAction::CategoriesLoaded { categories } => {
                state.categories = categories;
                SmallVec::new()
            },

            CatalogAction::LoadFailed { error } => {
                state.loading = false;
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
