//! Stroke drawings parsed from SVG path data.
//!
//! The format is line based: an optional `viewbox W H` header, then one
//! path per line using the `M L H V Z` commands (lowercase for relative).
//! Blank lines and lines starting with `#` are ignored.

use std::path::{Path, PathBuf};

/// Drawing shown when no custom drawing is configured.
const BUILTIN_DRAWING: &str = include_str!("../assets/signature.path");

#[derive(Debug, thiserror::Error)]
pub enum DrawingError {
    #[error("failed to read drawing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: unknown path command '{command}'")]
    UnknownCommand { line: usize, command: char },
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: missing coordinate for '{command}'")]
    MissingCoordinate { line: usize, command: char },
    #[error("line {line}: path must start with a moveto")]
    MissingMoveTo { line: usize },
    #[error("line {line}: viewbox needs a positive width and height")]
    InvalidViewBox { line: usize },
    #[error("drawing has no segments")]
    Empty,
}

/// A point in drawing units. `y` grows downward, as in SVG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// One stroke of the drawing: a path made of one or more polylines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    subpaths: Vec<Vec<Point>>,
}

impl Segment {
    /// Total stroke length.
    pub fn length(&self) -> f64 {
        self.subpaths
            .iter()
            .flat_map(|sub| sub.windows(2))
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Line pieces visible when the first `progress` (0.0-1.0) of the stroke
    /// length has been drawn.
    pub fn visible_lines(&self, progress: f64) -> Vec<(Point, Point)> {
        let mut remaining = self.length() * progress.clamp(0.0, 1.0);
        let mut lines = Vec::new();

        for pair in self.subpaths.iter().flat_map(|sub| sub.windows(2)) {
            if remaining <= 0.0 {
                break;
            }
            let (a, b) = (pair[0], pair[1]);
            let len = a.distance(b);
            if len <= remaining {
                lines.push((a, b));
                remaining -= len;
            } else {
                lines.push((a, a.lerp(b, remaining / len)));
                break;
            }
        }
        lines
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.subpaths.iter().flatten().copied()
    }
}

/// An ordered set of stroke segments inside a view box.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    width: f64,
    height: f64,
    segments: Vec<Segment>,
}

impl Default for Drawing {
    /// A drawing with no segments.
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            segments: Vec::new(),
        }
    }
}

impl Drawing {
    /// The built-in signature drawing.
    pub fn builtin() -> Result<Self, DrawingError> {
        Self::parse(BUILTIN_DRAWING)
    }

    /// Read and parse a drawing file.
    pub fn load(path: &Path) -> Result<Self, DrawingError> {
        let src = std::fs::read_to_string(path).map_err(|source| DrawingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&src)
    }

    /// Parse drawing source text.
    pub fn parse(src: &str) -> Result<Self, DrawingError> {
        let mut view_box = None;
        let mut segments = Vec::new();

        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            if let Some(rest) = text.strip_prefix("viewbox") {
                view_box = Some(parse_view_box(line, rest)?);
                continue;
            }
            segments.push(parse_path(line, text)?);
        }

        if segments.is_empty() {
            return Err(DrawingError::Empty);
        }

        let (width, height) = view_box.unwrap_or_else(|| bounds(&segments));
        Ok(Self {
            width,
            height,
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

fn parse_view_box(line: usize, rest: &str) -> Result<(f64, f64), DrawingError> {
    let values: Vec<f64> = rest
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| DrawingError::InvalidViewBox { line })?;

    match values.as_slice() {
        [w, h] if *w > 0.0 && *h > 0.0 => Ok((*w, *h)),
        _ => Err(DrawingError::InvalidViewBox { line }),
    }
}

/// Extent of all points, used when no view box is given.
fn bounds(segments: &[Segment]) -> (f64, f64) {
    segments
        .iter()
        .flat_map(|s| s.points())
        .fold((1.0_f64, 1.0_f64), |(w, h), p| (w.max(p.x), h.max(p.y)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(line: usize, data: &str) -> Result<Vec<Token>, DrawingError> {
    let mut tokens = Vec::new();
    let mut chars = data.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
        } else if matches!(c, 'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'Z' | 'z') {
            tokens.push(Token::Command(c));
            chars.next();
        } else if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') {
            let mut number = String::new();
            while let Some(&n) = chars.peek() {
                let exponent_sign = matches!(n, '-' | '+') && number.ends_with(['e', 'E']);
                let leading_sign = matches!(n, '-' | '+') && number.is_empty();
                if n.is_ascii_digit() || matches!(n, '.' | 'e' | 'E') || exponent_sign || leading_sign
                {
                    number.push(n);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = number.parse().map_err(|_| DrawingError::InvalidNumber {
                line,
                token: number.clone(),
            })?;
            tokens.push(Token::Number(value));
        } else {
            return Err(DrawingError::UnknownCommand { line, command: c });
        }
    }
    Ok(tokens)
}

fn parse_path(line: usize, data: &str) -> Result<Segment, DrawingError> {
    let tokens = tokenize(line, data)?;
    let mut tokens = tokens.into_iter().peekable();

    let mut subpaths: Vec<Vec<Point>> = Vec::new();
    let mut current = Point::new(0.0, 0.0);
    let mut start = current;
    let mut previous: Option<char> = None;

    while let Some(&token) = tokens.peek() {
        let command = match token {
            Token::Command(c) => {
                tokens.next();
                c
            }
            // Repeated coordinates reuse the previous command; after a
            // moveto they are implicit linetos.
            Token::Number(_) => match previous {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) if !matches!(c, 'Z' | 'z') => c,
                _ => return Err(DrawingError::MissingMoveTo { line }),
            },
        };

        let mut number = || match tokens.next() {
            Some(Token::Number(n)) => Ok(n),
            _ => Err(DrawingError::MissingCoordinate { line, command }),
        };

        let relative = command.is_ascii_lowercase();
        let next = match command.to_ascii_uppercase() {
            'M' => {
                let (x, y) = (number()?, number()?);
                let p = if relative {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                };
                subpaths.push(Vec::new());
                start = p;
                p
            }
            'L' => {
                let (x, y) = (number()?, number()?);
                if relative {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                }
            }
            'H' => {
                let x = number()?;
                Point::new(if relative { current.x + x } else { x }, current.y)
            }
            'V' => {
                let y = number()?;
                Point::new(current.x, if relative { current.y + y } else { y })
            }
            'Z' => start,
            _ => return Err(DrawingError::UnknownCommand { line, command }),
        };

        let Some(subpath) = subpaths.last_mut() else {
            return Err(DrawingError::MissingMoveTo { line });
        };
        subpath.push(next);
        current = next;
        previous = Some(command);
    }

    if subpaths.is_empty() {
        return Err(DrawingError::MissingMoveTo { line });
    }
    Ok(Segment { subpaths })
}
