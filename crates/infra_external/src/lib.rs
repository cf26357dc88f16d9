//! External Service Adapters
//!
//! HTTP implementations of the claim pipeline ports:
//!
//! - [`HttpDamageClassifier`]: posts the photo to an object-detection
//!   inference service and maps the first detection to an assessment
//! - [`OpenWeatherCorroborator`]: geocodes the location and checks the
//!   historical hourly series for rainfall on the day of loss
//! - [`StripeRefundIssuer`]: creates a PaymentIntent and refunds it
//!
//! Upstream failures are mapped to `PortError` in [`http`]; nothing is
//! retried.

pub mod config;
pub mod http;
pub mod classifier;
pub mod weather;
pub mod payments;

pub use config::{ClassifierConfig, PaymentConfig, WeatherConfig};
pub use classifier::HttpDamageClassifier;
pub use weather::OpenWeatherCorroborator;
pub use payments::StripeRefundIssuer;
