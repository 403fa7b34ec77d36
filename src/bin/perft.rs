use fortuna::board::Position;
use fortuna::perft::{divide, perft};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for Fortuna")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print per-root-move node counts
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;

    let base = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen).expect("Invalid FEN")
    };

    if args.divide {
        let mut pos = base;
        let mut total = 0u64;
        for (mv, nodes) in divide(&mut pos, depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("nodes: {total}");
        return;
    }

    if depth == 0 {
        println!("nodes: 1");
        return;
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build()
        .expect("thread pool");
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 {
            let mut pos = base.clone();
            perft(&mut pos, depth)
        } else {
            let mut root = base.clone();
            let root_moves = root.legal_moves();
            root_moves
                .par_iter()
                .map(|&mv| {
                    let mut pos = base.clone();
                    pos.make_move(mv, false);
                    perft(&mut pos, depth - 1)
                })
                .sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps {
        println!(
            "nodes: {nodes} elapsed: {:.3}s nps: {:.1}",
            dt,
            nodes as f64 / dt.max(f64::EPSILON)
        );
    } else {
        println!("nodes: {nodes}");
    }
}
