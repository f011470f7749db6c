#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::fmt::Write as _;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::seq::SliceRandom;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(feature = "std")]
use tetroship::{
    init_logging, random_fleet, serve, transport::tcp::TcpLineTransport,
    transport::LineTransport, Dimensions, GameSession, Placement, PlayerId, Readiness,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host one session: accept two peers and referee a single game.
    Serve {
        #[arg(long, default_value = "0.0.0.0:2201")]
        bind: String,
    },
    /// Play a full game in-process and print the wire exchange.
    Local {
        #[arg(long, help = "Fix RNG seed for a reproducible game (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Connect to a host and type protocol commands interactively.
    Connect {
        #[arg(long, default_value = "127.0.0.1:2201")]
        addr: String,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => serve(&bind).await?,
        Commands::Local { seed } => run_local(seed)?,
        Commands::Connect { addr } => run_connect(&addr).await?,
    }
    Ok(())
}

/// Scripted two-player game against one session, every line printed as it
/// crosses the (virtual) wire.
#[cfg(feature = "std")]
fn run_local(seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let dims = Dimensions::new(10, 10);
    let mut session = GameSession::new();

    exchange(&mut session, PlayerId::P1, "B 10 10");
    exchange(&mut session, PlayerId::P2, "B");

    for player in [PlayerId::P1, PlayerId::P2] {
        let fleet = random_fleet(&mut rng, dims)
            .ok_or_else(|| anyhow::anyhow!("fleet generation failed"))?;
        exchange(&mut session, player, &placement_line(&fleet));
    }

    // Each side fires down its own shuffled target list; the session
    // dictates whose turn it is.
    let mut targets: [Vec<(u16, u16)>; 2] = [all_cells(dims), all_cells(dims)];
    targets[0].shuffle(&mut rng);
    targets[1].shuffle(&mut rng);

    while !session.is_terminal() {
        let shooter = session.turn();
        match targets[shooter.index()].pop() {
            Some((row, col)) => {
                exchange(&mut session, shooter, &format!("S {} {}", row, col));
            }
            None => break,
        }
    }

    for player in [PlayerId::P1, PlayerId::P2] {
        if let Readiness::Playing { board, fleet, .. } = session.player(player).readiness() {
            println!("\n{} board, {} ship(s) afloat:\n{}", player, fleet.afloat(), board);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn exchange(session: &mut GameSession, from: PlayerId, line: &str) {
    println!("{} >> {}", from, line);
    for (to, reply) in session.handle_line(from, line) {
        println!("{} << {}", to, reply);
    }
}

#[cfg(feature = "std")]
fn placement_line(fleet: &[Placement]) -> String {
    let mut line = String::from("I");
    for p in fleet {
        let _ = write!(line, " {} {} {} {}", p.kind, p.rotation, p.col, p.row);
    }
    line
}

#[cfg(feature = "std")]
fn all_cells(dims: Dimensions) -> Vec<(u16, u16)> {
    (0..dims.height)
        .flat_map(|r| (0..dims.width).map(move |c| (r, c)))
        .collect()
}

/// Interactive peer: stdin lines go to the host, host lines to stdout.
#[cfg(feature = "std")]
async fn run_connect(addr: &str) -> anyhow::Result<()> {
    let mut transport = TcpLineTransport::connect(addr).await?;
    println!("connected to {}; type protocol commands (B/I/S/Q/F)", addr);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = transport.recv_line() => match line? {
                Some(line) => println!("{}", line),
                None => {
                    println!("host closed the connection");
                    break;
                }
            },
            line = input.next_line() => match line? {
                Some(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        transport.send_line(line).await?;
                    }
                }
                None => break,
            },
        }
    }
    Ok(())
}
