//! NATS API loop. Subscribes to request subjects and answers them.
//!
//! Subjects (all under configurable prefix, default "vehicles"):
//!
//!   Request/Reply:
//!     {prefix}.register   - register a new vehicle
//!     {prefix}.position   - report a vehicle position
//!     {prefix}.nearby     - list vehicles near a vehicle
//!     {prefix}.beacon     - notify vehicles near a vehicle
//!
//!   Publish:
//!     {prefix}.notifications.{vehicle_id} - beacon message for one vehicle

use futures::StreamExt;
use tracing::{error, info};

use vehicle_net::{NatsConnection, NetError};

use crate::handler::Handler;

pub struct Api {
    handler: Handler,
    conn: NatsConnection,
}

impl Api {
    pub fn new(handler: Handler, conn: NatsConnection) -> Self {
        Self { handler, conn }
    }

    /// Serve requests until the subscription closes.
    ///
    /// Each request is handled on its own task so slow proximity queries do
    /// not hold up position reports.
    pub async fn run(&self) -> Result<(), NetError> {
        let subject = self.handler.subjects().requests();
        info!(
            prefix = self.handler.subjects().prefix(),
            subject = %subject,
            "subscribing to API subjects"
        );
        let mut sub = self.conn.subscribe(&subject).await?;

        info!("vehicle server ready, listening for requests");

        while let Some(msg) = sub.next().await {
            let handler = self.handler.clone();
            let conn = self.conn.clone();

            tokio::spawn(async move {
                let reply = handler.handle(msg.subject.as_str(), &msg.payload);

                for (subject, notification) in &reply.notifications {
                    if let Err(e) = conn.publish(subject, notification).await {
                        error!(%e, subject = %subject, "failed to publish notification");
                    }
                }

                if let Some(reply_to) = msg.reply
                    && let Err(e) = conn.publish(reply_to.as_str(), &reply.response).await
                {
                    error!(%e, "failed to publish reply");
                }
            });
        }

        Ok(())
    }
}
