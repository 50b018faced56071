//! Protocol dispatcher: reads one envelope per line, routes it to the player, writes the reply.

use std::collections::HashMap;
use std::io::ErrorKind;

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::{
    config::ClientConfig,
    player::Player,
    protocol::{
        adapter::{fleet_to_wire, list_to_wire, wire_to_list},
        CoordinatesJson, EndGameJson, Envelope, JoinJson, JsonCodec, ProtocolError, SetupJson,
    },
    transport::Transport,
};

/// Turns a command's arguments into its reply arguments.
type Handler<P> = fn(&mut Context<P>, Value) -> Result<Value, ProtocolError>;

/// Everything a handler may touch.
struct Context<P> {
    player: P,
    codec: JsonCodec,
    config: ClientConfig,
}

/// Drives one server session over `transport` on behalf of `player`.
///
/// Commands are handled strictly one at a time, in arrival order. The session ends cleanly when
/// the server closes the stream, and fatally on an unknown command or a malformed message.
pub struct Dispatcher<P: Player, T: Transport> {
    context: Context<P>,
    transport: T,
    handlers: HashMap<&'static str, Handler<P>>,
}

impl<P: Player, T: Transport> Dispatcher<P, T> {
    pub fn new(player: P, transport: T) -> Self {
        Self::with_config(player, transport, ClientConfig::default())
    }

    pub fn with_config(player: P, transport: T, config: ClientConfig) -> Self {
        let mut handlers: HashMap<&'static str, Handler<P>> = HashMap::new();
        handlers.insert("join", join);
        handlers.insert("setup", setup);
        handlers.insert("take-shots", take_shots);
        handlers.insert("report-damage", report_damage);
        handlers.insert("successful-hits", successful_hits);
        handlers.insert("end-game", end_game);
        Self {
            context: Context {
                player,
                codec: JsonCodec,
                config,
            },
            transport,
            handlers,
        }
    }

    pub fn player(&self) -> &P {
        &self.context.player
    }

    pub fn into_player(self) -> P {
        self.context.player
    }

    /// Serve commands until the server hangs up.
    ///
    /// # Errors
    /// Any [`ProtocolError`] raised while handling a command, and `ProtocolError::Decode` for an
    /// inbound line the transport reports as malformed. No reply is written for the line that
    /// failed, and the transport is dropped with the dispatcher.
    pub async fn run(&mut self) -> Result<(), ProtocolError> {
        loop {
            let line = match self.transport.recv().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("Server closed the connection");
                    return Ok(());
                }
                Err(e) => match e.downcast::<std::io::Error>() {
                    Ok(io) if io.kind() == ErrorKind::InvalidData => {
                        error!("Malformed inbound line: {}", io);
                        return Err(ProtocolError::Decode(serde_json::Error::io(io)));
                    }
                    Ok(io) => {
                        warn!("Transport error, ending session: {}", io);
                        return Ok(());
                    }
                    Err(e) => {
                        warn!("Transport error, ending session: {}", e);
                        return Ok(());
                    }
                },
            };

            let reply = match self.handle_line(&line) {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Fatal protocol error: {}", e);
                    return Err(e);
                }
            };

            if let Err(e) = self.transport.send(&reply).await {
                warn!("Failed to send reply, ending session: {}", e);
                return Ok(());
            }
        }
    }

    /// Handle a single inbound line and produce the reply line, without the trailing newline.
    pub fn handle_line(&mut self, line: &str) -> Result<String, ProtocolError> {
        let envelope = self.context.codec.decode_envelope(line)?;
        let handler = *self
            .handlers
            .get(envelope.method_name.as_str())
            .ok_or_else(|| ProtocolError::UnknownCommand(envelope.method_name.clone()))?;
        debug!("<- {}", envelope.method_name);

        let arguments = handler(&mut self.context, envelope.arguments)?;
        let reply = Envelope::new(envelope.method_name, arguments);
        let text = self.context.codec.encode_envelope(&reply)?;
        debug!("-> {}", text);
        Ok(text)
    }
}

fn join<P: Player>(ctx: &mut Context<P>, _args: Value) -> Result<Value, ProtocolError> {
    let info = JoinJson {
        name: ctx.config.name.clone(),
        game_type: ctx.config.game_type,
    };
    ctx.codec.to_node(&info)
}

fn setup<P: Player>(ctx: &mut Context<P>, args: Value) -> Result<Value, ProtocolError> {
    let spec: SetupJson = ctx.codec.from_node(args)?;
    debug!(
        "setup: {}x{} board, fleet {:?}",
        spec.width, spec.height, spec.fleet_spec
    );
    ctx.player.resize(spec.height, spec.width)?;
    let ships = ctx
        .player
        .place_fleet(spec.height, spec.width, &spec.fleet_spec)?;
    ctx.codec.to_node(&fleet_to_wire(&ships)?)
}

fn take_shots<P: Player>(ctx: &mut Context<P>, _args: Value) -> Result<Value, ProtocolError> {
    let volley = ctx.player.next_volley()?;
    ctx.codec.to_node(&list_to_wire(&volley))
}

fn report_damage<P: Player>(ctx: &mut Context<P>, args: Value) -> Result<Value, ProtocolError> {
    let incoming: CoordinatesJson = ctx.codec.from_node(args)?;
    let shots = wire_to_list(&incoming);
    let hits = ctx.player.resolve_incoming(&shots)?;
    debug!("opponent fired {} shot(s), {} hit", shots.len(), hits.len());
    ctx.codec.to_node(&list_to_wire(&hits))
}

fn successful_hits<P: Player>(ctx: &mut Context<P>, args: Value) -> Result<Value, ProtocolError> {
    let confirmed: CoordinatesJson = ctx.codec.from_node(args)?;
    ctx.player.record_confirmed_hits(&wire_to_list(&confirmed))?;
    Ok(Value::Array(Vec::new()))
}

fn end_game<P: Player>(ctx: &mut Context<P>, args: Value) -> Result<Value, ProtocolError> {
    // the outcome is only reported; the player is not consulted
    match ctx.codec.from_node::<EndGameJson>(args) {
        Ok(outcome) => info!("Game over: {:?} ({})", outcome.result, outcome.reason),
        Err(e) => {
            info!("Game over");
            debug!("end-game arguments not understood: {}", e);
        }
    }
    Ok(Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{GameResult, PlayerError};
    use crate::coord::Coord;
    use crate::ship::{FleetSpec, Ship};
    use crate::transport::in_memory::InMemoryTransport;

    /// Records the calls it receives and answers with canned values.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        result: Option<GameResult>,
    }

    impl Player for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn resize(&mut self, height: usize, width: usize) -> Result<(), PlayerError> {
            self.calls.push(format!("resize {} {}", height, width));
            Ok(())
        }

        fn place_fleet(
            &mut self,
            _height: usize,
            _width: usize,
            _spec: &FleetSpec,
        ) -> Result<Vec<Ship>, PlayerError> {
            self.calls.push("place".to_string());
            Ok(Vec::new())
        }

        fn next_volley(&mut self) -> Result<Vec<Coord>, PlayerError> {
            Ok(Vec::new())
        }

        fn resolve_incoming(&mut self, _shots: &[Coord]) -> Result<Vec<Coord>, PlayerError> {
            Ok(Vec::new())
        }

        fn record_confirmed_hits(&mut self, hits: &[Coord]) -> Result<(), PlayerError> {
            self.calls.push(format!("hits {}", hits.len()));
            Ok(())
        }

        fn ships_afloat(&self) -> usize {
            0
        }

        fn end_game(&mut self, result: GameResult, _reason: &str) {
            self.result = Some(result);
        }
    }

    fn dispatcher() -> Dispatcher<Recorder, InMemoryTransport> {
        let (transport, _peer) = InMemoryTransport::pair();
        Dispatcher::new(Recorder::default(), transport)
    }

    #[test]
    fn setup_resizes_before_placing() {
        let mut d = dispatcher();
        let reply = d
            .handle_line(r#"{"method-name":"setup","arguments":{"width":7,"height":9,"fleet-spec":{"CARRIER":1}}}"#)
            .unwrap();
        assert_eq!(reply, r#"{"method-name":"setup","arguments":{"fleet":[]}}"#);
        assert_eq!(d.player().calls, vec!["resize 9 7", "place"]);
    }

    #[test]
    fn end_game_is_acknowledged_without_asking_the_player() {
        let mut d = dispatcher();
        let reply = d
            .handle_line(r#"{"method-name":"end-game","arguments":{"result":"WIN","reason":"all sunk"}}"#)
            .unwrap();
        assert_eq!(reply, r#"{"method-name":"end-game","arguments":[]}"#);
        assert_eq!(d.player().result, None);

        let reply = d
            .handle_line(r#"{"method-name":"end-game","arguments":[]}"#)
            .unwrap();
        assert_eq!(reply, r#"{"method-name":"end-game","arguments":[]}"#);
    }

    #[test]
    fn unknown_command_is_rejected_before_any_handler_runs() {
        let mut d = dispatcher();
        let err = d
            .handle_line(r#"{"method-name":"floob","arguments":[]}"#)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCommand(ref name) if name == "floob"));
        assert!(d.player().calls.is_empty());
    }

    #[test]
    fn malformed_arguments_are_decode_errors() {
        let mut d = dispatcher();
        assert!(matches!(
            d.handle_line(r#"{"method-name":"successful-hits","arguments":{"coords":[]}}"#),
            Err(ProtocolError::Decode(_))
        ));
        assert!(matches!(
            d.handle_line(r#"{"method-name":"join"}"#),
            Err(ProtocolError::Decode(_))
        ));
    }
}
