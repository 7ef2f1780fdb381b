pub mod config;
pub mod decisions {
    pub mod processor;
}
pub mod domain {
    pub mod amount;
    pub mod decision;
    pub mod event;
    pub mod occurrence;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod webhook;
    }
}
pub mod phone;
pub mod schema;
pub mod sift {
    pub mod client;
    pub mod dispatcher;
}

#[derive(Clone)]
pub struct AppState {
    pub processor: decisions::processor::DecisionProcessor,
    pub webhook_secret: String,
}
