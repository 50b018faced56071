use std::io::{self, BufReader};

use battlesalvo::{
    default_fleet_spec, init_logging, AiPlayer, ClientConfig, ConsolePlayer, Dispatcher,
    GameResult, GameType, LocalGame, TcpTransport, DEFAULT_BOARD_SIZE, DEFAULT_NAME,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Play BattleSalvo locally against the AI, or let the AI play on a server.
///
/// With no arguments a local game starts in this terminal. Given a host and a port, the client
/// connects to that server and plays automatically until the server ends the session.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server host to connect to.
    #[arg(requires = "port")]
    host: Option<String>,
    /// Server port.
    port: Option<u16>,
    /// Name announced to the server.
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,
    #[arg(long, value_enum, default_value_t = GameTypeArg::Single)]
    game_type: GameTypeArg,
    /// Local board width.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = board_dimension)]
    width: usize,
    /// Local board height.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = board_dimension)]
    height: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GameTypeArg {
    Single,
    Multi,
}

impl From<GameTypeArg> for GameType {
    fn from(arg: GameTypeArg) -> Self {
        match arg {
            GameTypeArg::Single => GameType::Single,
            GameTypeArg::Multi => GameType::Multi,
        }
    }
}

fn board_dimension(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "board dimensions must be between {} and {}",
            MIN_BOARD_SIZE, MAX_BOARD_SIZE
        ))
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    if let Some(s) = cli.seed {
        info!("Using fixed seed: {} (game will be reproducible)", s);
    }

    match (cli.host, cli.port) {
        (Some(host), Some(port)) => {
            let config = ClientConfig {
                name: cli.name,
                game_type: cli.game_type.into(),
            };
            info!("Connecting to {}:{} as {}...", host, port, config.name);
            let transport = TcpTransport::connect((host.as_str(), port)).await?;
            info!("Connected successfully!");
            let player = AiPlayer::new(config.name.clone(), make_rng(cli.seed));
            let mut dispatcher = Dispatcher::with_config(player, transport, config);
            dispatcher.run().await?;
        }
        _ => {
            let human = ConsolePlayer::new(
                "You",
                BufReader::new(io::stdin()),
                io::stdout(),
                make_rng(cli.seed),
            );
            let ai = AiPlayer::new(
                "Floob AI",
                make_rng(cli.seed.map(|s| s.wrapping_add(1))),
            );
            let mut game = LocalGame::new(human, ai, cli.width, cli.height, default_fleet_spec());
            match game.run()? {
                GameResult::Win => println!("You sank the whole enemy fleet!"),
                GameResult::Lose => println!("Your fleet has been sunk."),
                GameResult::Draw => println!("Nobody wins this one."),
            }
        }
    }
    Ok(())
}
