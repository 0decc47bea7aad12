#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use broadside::{
    init_logging, opponent::random_target, random_fleet, server, CellMask, ChannelNotifier,
    ComputerOpponent, FireRequest, GameError, InMemoryMatchRepository, MatchApi, MatchClient,
    MatchService, MatchState, ServerConfig, ShipDeployment, TcpTransport,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::{sleep, Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run the match server with a built-in computer opponent.
    Serve {
        #[arg(long, env = "BROADSIDE_BIND", default_value = broadside::config::DEFAULT_BIND)]
        bind: String,
        #[arg(
            long,
            env = "BROADSIDE_COMPUTER_ID",
            default_value = broadside::config::DEFAULT_COMPUTER_ID
        )]
        computer_id: String,
        #[arg(long, env = "BROADSIDE_THINK_MS", default_value_t = 600)]
        think_ms: u64,
        #[arg(long, env = "BROADSIDE_IO_TIMEOUT_SECS", default_value_t = 300)]
        io_timeout_secs: u64,
        #[arg(long, help = "Fix RNG seed for the computer opponent (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch a random player fight the computer opponent in-process.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play against the computer on a running server.
    Play {
        #[arg(long, default_value = "127.0.0.1:7878")]
        connect: String,
        #[arg(long, default_value = "player")]
        player: String,
        #[arg(long, help = "Fix RNG seed for fleet placement (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            computer_id,
            think_ms,
            io_timeout_secs,
            seed,
        } => {
            let config = ServerConfig {
                bind,
                computer_player_id: computer_id,
                think_delay: Duration::from_millis(think_ms),
                io_timeout: Duration::from_secs(io_timeout_secs),
                ..ServerConfig::default()
            };
            run_server(config, seeded_rng(seed)).await?;
        }
        Commands::Local { seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            run_local(seed).await?;
        }
        Commands::Play {
            connect,
            player,
            seed,
        } => {
            println!("Connecting to {}...", connect);
            let client = MatchClient::new(TcpTransport::connect(&connect).await?);
            run_play(&client, &player, seeded_rng(seed)).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_server(config: ServerConfig, rng: SmallRng) -> anyhow::Result<()> {
    let (notifier, events) = ChannelNotifier::channel();
    let service = Arc::new(MatchService::new(
        Arc::new(InMemoryMatchRepository::new()),
        notifier,
    ));
    let computer = ComputerOpponent::new(
        Arc::clone(&service),
        config.computer_player_id.clone(),
        config.think_delay,
        rng,
    );
    tokio::spawn(computer.run(events));

    let listener = TcpListener::bind(&config.bind).await?;
    server::serve(listener, service, config.io_timeout, config.max_message_size).await
}

/// Wait until it is `player`'s turn or the match is over.
#[cfg(feature = "std")]
async fn wait_for_turn<A: MatchApi>(
    api: &A,
    match_id: &str,
    player: &str,
) -> anyhow::Result<bool> {
    loop {
        let summary = api.status(match_id).await?;
        if summary.state == MatchState::Finished {
            if let Some(winner) = summary.winner {
                println!("Match over, {} won.", winner);
            }
            return Ok(false);
        }
        if summary.state == MatchState::InProgress
            && summary.next_player.as_deref() == Some(player)
        {
            return Ok(true);
        }
        sleep(Duration::from_millis(50)).await;
    }
}

#[cfg(feature = "std")]
fn fleet_request(rng: &mut SmallRng) -> Vec<ShipDeployment> {
    random_fleet(rng).iter().map(ShipDeployment::from).collect()
}

#[cfg(feature = "std")]
async fn run_local(seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = seeded_rng(seed);
    let computer_rng = seeded_rng(seed.map(|s| s.wrapping_add(1)));

    let (notifier, events) = ChannelNotifier::channel();
    let service = Arc::new(MatchService::new(
        Arc::new(InMemoryMatchRepository::new()),
        notifier,
    ));
    let computer = ComputerOpponent::new(
        Arc::clone(&service),
        "computer",
        Duration::ZERO,
        computer_rng,
    );
    tokio::spawn(computer.run(events));

    let player = "player";
    let summary = MatchApi::start(service.as_ref(), player, true).await?;
    println!("Match {} created", summary.id);
    let fleet = fleet_request(&mut rng);
    MatchApi::deploy_fleet(service.as_ref(), &summary.id, player, fleet).await?;

    let mut fired = CellMask::new();
    while wait_for_turn(service.as_ref(), &summary.id, player).await? {
        let Some(target) = random_target(&mut rng, &fired) else {
            break;
        };
        let _ = fired.insert(target);
        let response = MatchApi::fire(
            service.as_ref(),
            &summary.id,
            FireRequest::new(player, target.to_string()),
        )
        .await?;
        match response.ship_type_sunk {
            Some(ship) => println!(
                "{} fires at {}: {:?} {}",
                player, target, response.outcome, ship
            ),
            None => println!(
                "{} fires at {}: {:?}",
                player, target, response.outcome
            ),
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_play<A: MatchApi>(api: &A, player: &str, mut rng: SmallRng) -> anyhow::Result<()> {
    let summary = api.start(player, true).await?;
    println!("Match {} created, deploying a random fleet", summary.id);

    api.deploy_fleet(&summary.id, player, fleet_request(&mut rng))
        .await?;

    let stdin = io::stdin();
    while wait_for_turn(api, &summary.id, player).await? {
        print!("Your shot (e.g. B7): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let request = FireRequest::new(player, line.trim());
        match api.fire(&summary.id, request).await {
            Ok(response) => match response.ship_type_sunk {
                Some(ship) if response.game_won => println!("SUNK {}. You won!", ship),
                Some(ship) => println!("SUNK {}", ship),
                None => println!("{:?}", response.outcome),
            },
            Err(e) => match e.downcast_ref::<GameError>() {
                Some(err) => println!("Rejected: {}", err),
                None => return Err(e),
            },
        }
    }
    Ok(())
}
