use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("bundled dataset recipes.json is missing from the build")]
    DatasetMissing,

    #[error("malformed bundled dataset: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("recipe '{id}': unknown meal category '{value}'")]
    InvalidMealCategory { id: String, value: String },

    #[error("recipe '{id}': unknown cost tier '{value}'")]
    InvalidCostTier { id: String, value: String },
}
