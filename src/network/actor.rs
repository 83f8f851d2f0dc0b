//! Network actor - receives dispatch commands from the app layer

use tokio::sync::mpsc;

use crate::messages::NetworkCommand;
use crate::network::client::Transport;
use crate::network::dispatcher::Dispatcher;

/// Network actor that hands each request to the dispatcher
pub struct NetworkActor<T: Transport> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> NetworkActor<T> {
    pub fn new(dispatcher: Dispatcher<T>) -> Self {
        NetworkActor { dispatcher }
    }

    /// Run the network actor message loop
    pub async fn run(self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                NetworkCommand::Dispatch { id, spec } => {
                    // Detached: in-flight workers finish on their own and report back
                    drop(self.dispatcher.dispatch(id, spec));
                }
                NetworkCommand::Shutdown => {
                    tracing::info!("Network actor shutting down");
                    break;
                }
            }
        }
    }
}
