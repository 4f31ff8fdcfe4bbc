mod categories;
mod error;
mod mapping;

pub use categories::ProviderError;
pub use error::{ErrorCode, ImageError, ImageGenError, ImageGenResult};
pub use mapping::{
    ErrorMapper, ProviderErrorDetail, ProviderErrorResponse, CONTENT_POLICY_MARKERS,
};
