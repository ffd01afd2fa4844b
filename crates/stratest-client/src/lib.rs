pub mod client_ext;
pub mod config;
pub mod error;
pub mod flows;
pub mod forms;
pub mod schema;

pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::client_ext::api::ClientApiExt as Api;
    #[allow(unused_imports)]
    pub use crate::client_ext::Client;
    pub use crate::config::Config;
    pub use crate::flows::{
        fetch_data_flow, generate_report_flow, show_history_flow, FlowOutcome, Notifier,
        PageSink, ReportView, Trigger,
    };
    pub use crate::forms::{FetchForm, ReportForm};

    pub fn build_client(user_agent: &str) -> crate::Result<Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}
