pub mod credential;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod openai;

pub use credential::Credential;
pub use error::GatewayError;
pub use gateway::{ImageGateway, TextGateway};
pub use self::metrics::{get_metrics, init_metrics};
pub use openai::{ChatCompletionGateway, ImageGenerationGateway, OpenAiClient};
