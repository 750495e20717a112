mod api;
mod format;
mod responder;
mod responder_manager;
mod responders;
mod schedule;

use std::sync::Arc;

use anyhow::{Context, Result};
use matrix_sdk::{
    config::SyncSettings,
    event_handler::Ctx,
    ruma::events::room::message::{
        MessageType, OriginalSyncRoomMessageEvent, RoomMessageEventContent,
    },
    Client,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ScheduleClient;
use crate::responder::ResponderContext;
use crate::responder_manager::ResponderManager;
use crate::responders::{PingPongResponder, SalmonResponder, StageResponder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "spla2_bot=info,matrix_sdk=warn".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spla2 schedule bot");

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Get Matrix credentials from environment
    let homeserver = std::env::var("MATRIX_HOMESERVER")
        .context("MATRIX_HOMESERVER environment variable not set")?;
    let username = std::env::var("MATRIX_USER")
        .context("MATRIX_USER environment variable not set")?;
    let password = std::env::var("MATRIX_PASSWORD")
        .context("MATRIX_PASSWORD environment variable not set")?;

    info!("Connecting to homeserver: {}", homeserver);

    // Create Matrix client
    let client = Client::builder()
        .homeserver_url(&homeserver)
        .build()
        .await
        .context("Failed to create Matrix client")?;

    // Login
    info!("Logging in as: {}", username);
    client
        .matrix_auth()
        .login_username(&username, &password)
        .initial_device_display_name("spla2 schedule bot")
        .await
        .context("Failed to login")?;

    info!("✓ Successfully logged in");

    // The schedule API client is the only long-lived shared object
    let schedule_client = Arc::new(ScheduleClient::new()?);

    let mut manager = ResponderManager::new();
    manager.register(Arc::new(SalmonResponder::new(schedule_client.clone())?));
    manager.register(Arc::new(StageResponder::new(schedule_client.clone())?));
    manager.register(Arc::new(PingPongResponder::new()?));
    info!("Registered {} responders", manager.count());

    // Register event handler for room messages
    client.add_event_handler_context(Arc::new(manager));
    client.add_event_handler(on_room_message);

    info!("Starting sync loop...");

    // Start syncing
    let sync_settings = SyncSettings::default();
    client
        .sync(sync_settings)
        .await
        .context("Sync loop failed")?;

    Ok(())
}

/// Event handler for room messages
async fn on_room_message(
    event: OriginalSyncRoomMessageEvent,
    room: matrix_sdk::Room,
    manager: Ctx<Arc<ResponderManager>>,
) {
    let sender = &event.sender;

    // Ignore messages from ourselves to prevent reply loops
    if sender == room.own_user_id() {
        return;
    }

    // Only text messages can carry commands
    let MessageType::Text(text_content) = &event.content.msgtype else {
        return;
    };

    let context = ResponderContext {
        sender: sender.to_string(),
        message_body: text_content.body.clone(),
    };

    let reply = match manager.process_message(&context).await {
        Ok(Some(reply)) => reply,
        Ok(None) => return,
        Err(e) => {
            error!(
                room_id = %room.room_id(),
                error = %e,
                "Failed to process message"
            );
            return;
        }
    };

    if let Err(e) = room.send(RoomMessageEventContent::text_plain(reply)).await {
        error!(
            room_id = %room.room_id(),
            error = %e,
            "✗ Failed to send reply"
        );
    }
}
