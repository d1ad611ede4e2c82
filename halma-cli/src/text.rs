//! Plain-text frontend: ASCII board on a writer, `x y` selections from a reader

use std::collections::HashSet;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use halma_core::{BoardState, Frontend, Input, Layout, PlayerId, Point, Region};

const PROMPT: &str = "select x y (q to quit)> ";

/// Board rows from top to bottom, followed by a coordinate legend.
///
/// Pieces show their region number, `*` marks a highlighted empty point and
/// `@` a highlighted piece, `.` an empty point.
pub fn render_board<L: Layout>(board: &BoardState<L>, highlighted: &[Point]) -> String {
    let points: HashSet<Point> = board.points().into_iter().collect();
    let highlighted: HashSet<Point> = highlighted.iter().copied().collect();
    let (Some(x_min), Some(x_max)) = (
        points.iter().map(|p| p.x).min(),
        points.iter().map(|p| p.x).max(),
    ) else {
        return String::new();
    };
    let y_min = points.iter().map(|p| p.y).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.y).max().unwrap_or(0);

    let mut out = String::new();
    for y in (y_min..=y_max).rev() {
        let mut row = format!("{:>4} ", y);
        for x in x_min..=x_max {
            let point = Point::new(x, y);
            let cell = match board.piece_at(point) {
                _ if !points.contains(&point) => ' ',
                Some(_) if highlighted.contains(&point) => '@',
                Some(piece) => region_char(piece.region),
                None if highlighted.contains(&point) => '*',
                None => '.',
            };
            row.push(cell);
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&format!(
        "     x: {} .. {} (left to right), y: {} .. {} (top to bottom)\n",
        x_min, x_max, y_max, y_min
    ));
    out
}

fn region_char(region: Region) -> char {
    char::from_digit(u32::from(region), 36).unwrap_or('?')
}

/// `None` for anything that is neither a quit request nor two integers
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Some(Input::Quit);
    }
    let fields: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    match fields.as_slice() {
        [x, y] => Some(Input::Select(Point::new(x.parse().ok()?, y.parse().ok()?))),
        _ => None,
    }
}

pub struct TextFrontend<R, W> {
    input: R,
    output: W,
}

impl TextFrontend<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Output is best-effort; a closed terminal must not abort the game
    fn emit(&mut self, text: &str) {
        if let Err(err) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            tracing::warn!(%err, "failed to write to terminal");
        }
    }
}

impl<L: Layout, R: BufRead, W: Write> Frontend<L> for TextFrontend<R, W> {
    fn render(&mut self, board: &BoardState<L>, highlighted: &[Point]) {
        let text = render_board(board, highlighted);
        self.emit(&format!("\n{}", text));
    }

    fn next_input(&mut self) -> Input {
        loop {
            self.emit(PROMPT);
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return Input::Quit,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "failed to read input");
                    return Input::Quit;
                }
            }
            match parse_input(&line) {
                Some(input) => return input,
                None => self.emit("expected two integers like '2 -4', or 'q'\n"),
            }
        }
    }

    fn announce_turn(&mut self, player: PlayerId, regions: &[Region]) {
        self.emit(&format!("{} to move (regions {:?})\n", player, regions));
    }

    fn show_path(&mut self, _board: &BoardState<L>, path: &[Point]) {
        let hops: Vec<String> = path.iter().map(Point::to_string).collect();
        self.emit(&format!("moved {}\n", hops.join(" -> ")));
    }

    fn announce_win(&mut self, player: PlayerId, regions: &[Region]) {
        self.emit(&format!("{} wins with regions {:?}!\n", player, regions));
    }
}
