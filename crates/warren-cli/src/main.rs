//! Command-line front end for the warren generator.
//!
//! Generates one level, prints the generation report and a top-down ASCII
//! plan, or dumps the full layout as JSON.

use clap::Parser;
use warren_core::{GenParams, GenRng, Generator, PieceKind, Scene};

#[derive(Parser, Debug)]
#[command(name = "warren", about = "Generate a room-and-corridor level")]
struct Args {
    /// Seed for the layout; random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rooms to attempt.
    #[arg(long, default_value_t = 10)]
    rooms: usize,

    /// Side length of the square placement area.
    #[arg(long, default_value_t = 140.0)]
    area: f32,

    /// Minimum room side.
    #[arg(long, default_value_t = 12.0)]
    room_min: f32,

    /// Maximum room side.
    #[arg(long, default_value_t = 20.0)]
    room_max: f32,

    /// Minimum gap between rooms.
    #[arg(long, default_value_t = 10.0)]
    separation: f32,

    /// Corridor interior width.
    #[arg(long, default_value_t = 5.0)]
    corridor_width: f32,

    /// Dump the layout as JSON instead of the report and plan.
    #[arg(long)]
    json: bool,

    /// Skip the ASCII plan.
    #[arg(long)]
    no_map: bool,
}

fn main() {
    let args = Args::parse();
    let params = GenParams {
        num_rooms: args.rooms,
        room_size_min: args.room_min,
        room_size_max: args.room_max,
        area_size: args.area,
        min_room_separation: args.separation,
        corridor_width: args.corridor_width,
        ..GenParams::default()
    };
    let seed = args.seed.unwrap_or_else(|| GenRng::from_entropy().seed());

    let mut generator = match Generator::new(params, seed) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("invalid parameters: {err}");
            std::process::exit(2);
        }
    };
    generator.generate(None);

    if args.json {
        match serde_json::to_string_pretty(&generator.layout()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize layout: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_report(&generator);
    if !args.no_map {
        println!();
        print!("{}", render_plan(generator.scene()));
    }
}

fn print_report(generator: &Generator) {
    let report = generator.report();
    println!(
        "seed {}: {}/{} rooms placed, {} spanning + {} repair corridor(s), loop {}",
        report.seed,
        report.rooms_placed,
        report.rooms_requested,
        report.spanning_corridors,
        report.repair_corridors,
        if report.loop_closed { "closed" } else { "open" },
    );
    if report.rooms_skipped > 0 {
        println!("  {} room(s) skipped: no space left", report.rooms_skipped);
    }
    if !report.unreachable_rooms.is_empty() {
        println!("  unreachable rooms: {:?}", report.unreachable_rooms);
    }
    if !report.under_connected_rooms.is_empty() {
        println!(
            "  rooms with a single connection: {:?}",
            report.under_connected_rooms
        );
    }
    println!("  {} unused door(s) sealed", report.doors_sealed);
}

/// Size of one plan cell in world units.
const CELL: f32 = 1.0;

/// Top-down plan: room floors '.', corridor floors '#', walls '|' and '-',
/// door openings '+'.
fn render_plan(scene: &Scene) -> String {
    let mut min_x = f32::MAX;
    let mut min_z = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_z = f32::MIN;
    for (_, piece) in scene.iter() {
        min_x = min_x.min(piece.bounds.min().x);
        min_z = min_z.min(piece.bounds.min().z);
        max_x = max_x.max(piece.bounds.max().x);
        max_z = max_z.max(piece.bounds.max().z);
    }
    if min_x > max_x {
        return String::from("(empty scene)\n");
    }

    let cols = ((max_x - min_x) / CELL).ceil() as usize + 1;
    let rows = ((max_z - min_z) / CELL).ceil() as usize + 1;
    let mut grid = vec![vec![' '; cols]; rows];

    let paint = |scene: &Scene, wanted: fn(PieceKind) -> bool, grid: &mut Vec<Vec<char>>| {
        for (_, piece) in scene.iter() {
            if !wanted(piece.kind) {
                continue;
            }
            let glyph = match piece.kind {
                PieceKind::Floor => {
                    if piece.room.is_some() {
                        '.'
                    } else {
                        '#'
                    }
                }
                PieceKind::DoorFrame => '+',
                _ => {
                    if piece.bounds.size.x >= piece.bounds.size.z {
                        '-'
                    } else {
                        '|'
                    }
                }
            };
            let lo_c = (((piece.bounds.min().x - min_x) / CELL).floor() as usize).min(cols - 1);
            let hi_c = (((piece.bounds.max().x - min_x) / CELL).floor() as usize).min(cols - 1);
            let lo_r = (((piece.bounds.min().z - min_z) / CELL).floor() as usize).min(rows - 1);
            let hi_r = (((piece.bounds.max().z - min_z) / CELL).floor() as usize).min(rows - 1);
            for row in grid.iter_mut().take(hi_r + 1).skip(lo_r) {
                for cell in row.iter_mut().take(hi_c + 1).skip(lo_c) {
                    *cell = glyph;
                }
            }
        }
    };

    // Floors first, then walls over their edges, then door openings on top.
    paint(scene, |k| k == PieceKind::Floor, &mut grid);
    paint(
        scene,
        |k| matches!(k, PieceKind::Wall | PieceKind::Pillar | PieceKind::Lintel),
        &mut grid,
    );
    paint(scene, |k| k == PieceKind::DoorFrame, &mut grid);

    // Rows in world +Z order, printed top-down.
    let mut out = String::with_capacity(rows * (cols + 1));
    for row in grid.iter().rev() {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
