use ag_ui_handler::config::ServerConfig;
use ag_ui_handler::handler::events::{EventSender, EventStream, event_channel};
use ag_ui_handler::logging::TracingLogger;
use ag_ui_handler::{AgUiEvent, AgUiHandler, AgUiServer, RunAgentInput, RunContext, error::Result};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Replies to the last user message one word at a time.
fn echo_agent(ctx: RunContext, input: RunAgentInput) -> EventStream {
    let (sender, stream) = event_channel(16);
    let (thread_id, run_id) = (ctx.thread_id, ctx.run_id);
    let text = input
        .last_user_message()
        .map(|m| m.text_content())
        .unwrap_or_else(|| "Nothing to echo".to_string());

    tokio::spawn(async move {
        if let Err(e) = echo(&sender, thread_id, run_id, text).await {
            info!("Stopping echo: {}", e);
        }
    });

    stream
}

async fn echo(sender: &EventSender, thread_id: String, run_id: String, text: String) -> Result<()> {
    let message_id = format!("msg_{}", run_id);

    sender
        .send(AgUiEvent::run_started(thread_id.clone(), run_id.clone()))
        .await?;
    sender
        .send(AgUiEvent::TextMessageStart {
            message_id: message_id.clone(),
            role: "assistant".to_string(),
        })
        .await?;

    for word in text.split_inclusive(' ') {
        tokio::time::sleep(Duration::from_millis(100)).await;
        sender
            .send(AgUiEvent::TextMessageContent {
                message_id: message_id.clone(),
                delta: word.to_string(),
            })
            .await?;
    }

    sender.send(AgUiEvent::TextMessageEnd { message_id }).await?;
    sender
        .send(AgUiEvent::run_finished(thread_id, run_id))
        .await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    // Optional config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    info!("Starting echo agent");
    info!(
        " - Agent runs:   POST http://{}:{}{}",
        config.address, config.port, config.path
    );
    info!(
        " - Health check: GET  http://{}:{}{}",
        config.address, config.port, config.health_path
    );
    info!("Example SSE client with curl:");
    info!(
        "curl -N -X POST http://{}:{}{} -H 'Accept: text/event-stream' \\",
        config.address, config.port, config.path
    );
    info!("  -d '{{\"messages\":[{{\"id\":\"1\",\"role\":\"user\",\"content\":\"hello there\"}}]}}'");
    info!("Press Ctrl+C to exit");

    let handler = AgUiHandler::new(echo_agent).with_logger(TracingLogger);
    AgUiServer::run(config, handler).await?;

    info!("Example finished");
    Ok(())
}
