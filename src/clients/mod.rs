pub mod bedrock;
pub mod teams;

pub use bedrock::BedrockClient;
pub use teams::TeamsClient;
