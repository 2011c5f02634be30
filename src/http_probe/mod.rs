pub mod outcome;
pub mod request;
pub mod sampler;
pub mod transport;

pub mod prelude {
    pub use super::outcome::ProbeOutcome;
    pub use super::request::{Method, ProbeRequest};
    pub use super::sampler::sample;
    pub use super::transport::{HttpTransport, Transport};
}
