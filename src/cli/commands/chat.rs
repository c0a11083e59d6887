use anyhow::Result;

use crate::chat::ChatSession;
use crate::cli::context::AppContext;

pub async fn run_chat(context: AppContext) -> Result<()> {
    let mut session = ChatSession::new(context);
    session.run().await
}
