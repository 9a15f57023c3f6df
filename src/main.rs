use docopt::Docopt;
use error_chain::bail;
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use maze_solver::{
    cells::Cell,
    grid::MazeGrid,
    grid_displays::{DisplayedGrid, LayeredDisplay, PathDisplay, StartEndPointsDisplay, VisitedDisplay},
    playback::{self, CancelToken},
    service::{self, LocalMazeService, MazeService, SolveRequest, SolveWithStepsResponse},
};
use std::{
    fs,
    process,
    time::Duration,
};

const USAGE: &str = "Maze Solver

Usage:
    maze_solver -h | --help
    maze_solver generate [--size=<n>] [--seed=<s>] [--json]
    maze_solver solve [--size=<n>] [--seed=<s>] [--maze-file=<path>] [--json] [--animate] [--step-delay=<ms>]

Options:
    -h --help            Show this screen.
    --size=<n>           Number of cells along each side of the square maze [default: 25].
    --seed=<s>           Seed for the generator's random source. Picked at random when not given.
    --maze-file=<path>   Solve the maze stored in this JSON file (fields: rows, cols, grid, start, end) instead of generating one.
    --json               Print the service response as JSON rather than drawing the maze.
    --animate            Replay the search frontier and then the solution path in the terminal. Ctrl-C skips to the result.
    --step-delay=<ms>    Milliseconds to wait between animation steps [default: 20].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_generate: bool,
    cmd_solve: bool,
    flag_size: usize,
    flag_seed: Option<u64>,
    flag_maze_file: Option<String>,
    flag_json: bool,
    flag_animate: bool,
    flag_step_delay: u64,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_solver::errors::Error, ::maze_solver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            SignalHandler(::ctrlc::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("maze generator seed {}", seed);
    let mut maze_service = LocalMazeService::new(XorShiftRng::seed_from_u64(seed));

    if !maze_service.health_check() {
        bail!("maze service is not available");
    }

    if args.cmd_generate {
        let generated = maze_service.generate(args.flag_size)?;
        if args.flag_json {
            println!("{}", serde_json::to_string_pretty(&generated)?);
        } else {
            let markers = StartEndPointsDisplay::new(generated.start, generated.end);
            print!("{}", DisplayedGrid::new(&generated.grid, Some(&markers)));
        }
    } else if args.cmd_solve {
        let request = match args.flag_maze_file {
            Some(ref path) => load_solve_request(path)?,
            None => SolveRequest::from(maze_service.generate(args.flag_size)?),
        };
        let response = service::solve_with_steps_or_fallback(&maze_service, &request)?;

        if args.flag_json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            if args.flag_animate {
                let cancel = skip_animation_on_interrupt()?;
                animate(&request, &response, Duration::from_millis(args.flag_step_delay), &cancel);
            }
            draw_solution(&request, &response);
        }
    }

    Ok(())
}

fn load_solve_request(file_path: &str) -> Result<SolveRequest> {
    let text = fs::read_to_string(file_path)
        .chain_err(|| format!("Failed to read maze file {}", file_path))?;
    let request = serde_json::from_str(&text)
        .chain_err(|| format!("Failed to parse maze file {}", file_path))?;
    Ok(request)
}

fn draw_frame(grid: &MazeGrid, start: Cell, end: Cell, path: &[Cell], visited: &[Cell]) {
    let markers = StartEndPointsDisplay::new(start, end);
    let path_display = PathDisplay::new(path);
    let visited_display = VisitedDisplay::new(visited);
    let layered = LayeredDisplay::new()
        .layer(&markers)
        .layer(&path_display)
        .layer(&visited_display);
    print!("{}{}", CLEAR_SCREEN, DisplayedGrid::new(grid, Some(&layered)));
}

/// The first Ctrl-C cancels the returned token, cutting the animation short. A second one exits.
fn skip_animation_on_interrupt() -> Result<CancelToken> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            process::exit(130);
        }
        info!("interrupted, skipping the animation");
        handler_token.cancel();
    })?;
    Ok(cancel)
}

/// Replays the search frontier, then the solution path on top of the fully searched maze.
fn animate(request: &SolveRequest,
           response: &SolveWithStepsResponse,
           step_delay: Duration,
           cancel: &CancelToken) {
    let (grid, start, end) = (&request.grid, request.start, request.end);

    let visited = &response.visited_order;
    let outcome = playback::replay(visited.as_slice(), step_delay, cancel, |index, _| {
        draw_frame(grid, start, end, &[], &visited[..=index]);
    });
    info!("search playback: {:?}", outcome);

    let path = &response.solution;
    let outcome = playback::replay(path.as_slice(), step_delay, cancel, |index, _| {
        draw_frame(grid, start, end, &path[..=index], visited);
    });
    info!("path playback: {:?}", outcome);
}

fn draw_solution(request: &SolveRequest, response: &SolveWithStepsResponse) {
    let markers = StartEndPointsDisplay::new(request.start, request.end);
    let path_display = PathDisplay::new(&response.solution);
    let layered = LayeredDisplay::new().layer(&markers).layer(&path_display);
    print!("{}", DisplayedGrid::new(&request.grid, Some(&layered)));

    if response.found {
        println!("Path of {} tiles from {} to {}, {} tiles searched.",
                 response.path_length,
                 request.start,
                 request.end,
                 response.visited_order.len());
    } else {
        println!("No path from {} to {}, {} tiles searched.",
                 request.start,
                 request.end,
                 response.visited_order.len());
    }
}
