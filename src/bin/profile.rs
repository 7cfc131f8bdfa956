use weavemaze::{app, grid::Topology, maze::MazeConfig};

fn main() -> weavemaze::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let topology = match args.next() {
        Some(name) => name.parse::<Topology>()?,
        None => Topology::Square,
    };

    let config = MazeConfig::default().with_seed(1);
    let summary = app::profile(topology, 255, 255, &config, num_iters)?;
    println!("{summary:?}");
    Ok(())
}
