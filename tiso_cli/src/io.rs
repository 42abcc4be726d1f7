//! Text formats.
//!
//! Graph file:
//! ```text
//! directed            <- or "undirected"
//! 4                   <- node count
//! 0 1                 <- one edge per line, fields split on ',', ' ' or tab
//! 1 2
//! ```
//! Temporal graph files add a time to each edge line (`src dst time`), and
//! their endpoints are names: each new name gets the next free id.
//!
//! Query files hold one block per query, each opened by a `#id` line and
//! followed by a graph in the formats above (with numeric endpoints).

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;
use tiso_common::QueryReport;
use tiso_subgraph::{Graph, GraphError, NodeId, TemporalGraph, Timestamp};

/// Errors raised while reading graphs and queries.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// A line does not follow the format.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
    /// The edges do not fit the declared node count.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Errors raised while writing result tables and query files.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A query graph with the identifier it is reported under.
#[derive(Clone, Debug)]
pub struct NamedQuery<G> {
    /// Identifier written to the results.
    pub id: String,
    /// The pattern.
    pub graph: G,
}

type Line = (usize, String);

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

/// Non-blank lines with their 1-based numbers.
fn content_lines<R: BufRead>(reader: R) -> Result<Vec<Line>, LoadError> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push((i + 1, trimmed.to_owned()));
        }
    }
    Ok(lines)
}

fn fields(line: &str) -> Vec<&str> {
    line.split([',', ' ', '\t']).filter(|f| !f.is_empty()).collect()
}

fn number<T: std::str::FromStr>(line: usize, field: &str) -> Result<T, LoadError> {
    field
        .parse()
        .map_err(|_| parse_error(line, format!("expected a number, found {field:?}")))
}

/// Direction and node count from the first two lines of `lines`.
fn parse_header<'a>(lines: &mut impl Iterator<Item = &'a Line>, last_line: usize) -> Result<(bool, usize), LoadError> {
    let (line, direction) = lines
        .next()
        .ok_or_else(|| parse_error(last_line, "missing direction line"))?;
    let directed = match direction.to_ascii_lowercase().as_str() {
        "directed" => true,
        "undirected" => false,
        other => return Err(parse_error(*line, format!("expected directed or undirected, found {other:?}"))),
    };
    let (line, count) = lines
        .next()
        .ok_or_else(|| parse_error(*line, "missing node count line"))?;
    Ok((directed, number(*line, count)?))
}

fn edge_fields<'l>(line: usize, text: &'l str, expected: usize) -> Result<Vec<&'l str>, LoadError> {
    let parts = fields(text);
    if parts.len() == expected {
        Ok(parts)
    } else {
        Err(parse_error(line, format!("expected {expected} fields, found {}", parts.len())))
    }
}

fn build_graph(lines: &[Line], last_line: usize) -> Result<Graph, LoadError> {
    let mut iter = lines.iter();
    let (directed, num_nodes) = parse_header(&mut iter, last_line)?;
    let edges = iter
        .map(|(line, text)| {
            let parts = edge_fields(*line, text, 2)?;
            Ok((number::<NodeId>(*line, parts[0])?, number::<NodeId>(*line, parts[1])?))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;
    Ok(Graph::try_from_edges(directed, num_nodes, edges)?)
}

fn build_temporal_graph(lines: &[Line], last_line: usize, named: bool) -> Result<TemporalGraph, LoadError> {
    let mut iter = lines.iter();
    let (directed, num_nodes) = parse_header(&mut iter, last_line)?;
    let mut names: HashMap<String, NodeId> = HashMap::new();
    let mut id = |line: usize, name: &str| -> Result<NodeId, LoadError> {
        if named {
            let next = names.len();
            Ok(*names.entry(name.to_owned()).or_insert(next))
        } else {
            number(line, name)
        }
    };
    let mut contacts = Vec::new();
    for (line, text) in iter {
        let parts = edge_fields(*line, text, 3)?;
        let source = id(*line, parts[0])?;
        let dest = id(*line, parts[1])?;
        let time: Timestamp = number(*line, parts[2])?;
        contacts.push((source, dest, time));
    }
    Ok(TemporalGraph::try_from_contacts(directed, num_nodes, contacts)?)
}

/// Parse a plain graph file.
///
/// # Errors
///
/// Fails on I/O errors, malformed lines and out-of-range endpoints.
pub fn parse_graph<R: BufRead>(reader: R) -> Result<Graph, LoadError> {
    let lines = content_lines(reader)?;
    build_graph(&lines, lines.last().map_or(0, |(n, _)| *n))
}

/// Parse a temporal graph file, remapping endpoint names to dense ids.
///
/// # Errors
///
/// Fails on I/O errors, malformed lines, and more names than declared nodes.
pub fn parse_temporal_graph<R: BufRead>(reader: R) -> Result<TemporalGraph, LoadError> {
    let lines = content_lines(reader)?;
    build_temporal_graph(&lines, lines.last().map_or(0, |(n, _)| *n), true)
}

/// Split a query file into `#`-headed blocks.
fn blocks(lines: &[Line]) -> Result<Vec<(String, &[Line])>, LoadError> {
    let mut starts: Vec<usize> = Vec::new();
    for (i, (line, text)) in lines.iter().enumerate() {
        if text.starts_with('#') {
            starts.push(i);
        } else if starts.is_empty() {
            return Err(parse_error(*line, "expected a '#' query header"));
        }
    }
    let mut out = Vec::with_capacity(starts.len());
    for (k, &start) in starts.iter().enumerate() {
        let end = starts.get(k + 1).copied().unwrap_or(lines.len());
        let header = lines[start].1.trim_start_matches('#').trim();
        let id = if header.is_empty() { format!("q{k}") } else { header.to_owned() };
        out.push((id, &lines[start + 1..end]));
    }
    Ok(out)
}

/// Parse a file of plain queries.
///
/// # Errors
///
/// Fails on I/O errors or on the first malformed block.
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<NamedQuery<Graph>>, LoadError> {
    let lines = content_lines(reader)?;
    blocks(&lines)?
        .into_iter()
        .map(|(id, block)| {
            let last = block.last().map_or(0, |(n, _)| *n);
            Ok(NamedQuery {
                id,
                graph: build_graph(block, last)?,
            })
        })
        .collect()
}

/// Parse a file of temporal queries (`src dst time` edge lines, numeric ids).
///
/// # Errors
///
/// Fails on I/O errors or on the first malformed block.
pub fn parse_temporal_queries<R: BufRead>(reader: R) -> Result<Vec<NamedQuery<TemporalGraph>>, LoadError> {
    let lines = content_lines(reader)?;
    blocks(&lines)?
        .into_iter()
        .map(|(id, block)| {
            let last = block.last().map_or(0, |(n, _)| *n);
            Ok(NamedQuery {
                id,
                graph: build_temporal_graph(block, last, false)?,
            })
        })
        .collect()
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    Ok(BufReader::new(File::open(path)?))
}

/// [`parse_graph`] on a file.
///
/// # Errors
///
/// See [`parse_graph`].
pub fn read_graph(path: &Path) -> Result<Graph, LoadError> {
    parse_graph(open(path)?)
}

/// [`parse_temporal_graph`] on a file.
///
/// # Errors
///
/// See [`parse_temporal_graph`].
pub fn read_temporal_graph(path: &Path) -> Result<TemporalGraph, LoadError> {
    parse_temporal_graph(open(path)?)
}

/// [`parse_queries`] on a file.
///
/// # Errors
///
/// See [`parse_queries`].
pub fn read_queries(path: &Path) -> Result<Vec<NamedQuery<Graph>>, LoadError> {
    parse_queries(open(path)?)
}

/// [`parse_temporal_queries`] on a file.
///
/// # Errors
///
/// See [`parse_temporal_queries`].
pub fn read_temporal_queries(path: &Path) -> Result<Vec<NamedQuery<TemporalGraph>>, LoadError> {
    parse_temporal_queries(open(path)?)
}

fn direction(directed: bool) -> &'static str {
    if directed { "directed" } else { "undirected" }
}

/// Undirected edges are written once, from the smaller endpoint.
fn written(directed: bool, source: NodeId, dest: NodeId) -> bool {
    directed || source <= dest
}

/// Write plain queries in the format [`parse_queries`] reads.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_queries<W: Write>(mut writer: W, queries: &[NamedQuery<Graph>]) -> Result<(), ReportError> {
    for query in queries {
        let g = &query.graph;
        writeln!(writer, "#{}", query.id)?;
        writeln!(writer, "{}", direction(g.is_directed()))?;
        writeln!(writer, "{}", g.num_nodes())?;
        for source in 0..g.num_nodes() {
            for &dest in g.out_neighbors(source) {
                if written(g.is_directed(), source, dest) {
                    writeln!(writer, "{source} {dest}")?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write temporal queries in the format [`parse_temporal_queries`] reads.
/// Untimed edges are dropped.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_temporal_queries<W: Write>(mut writer: W, queries: &[NamedQuery<TemporalGraph>]) -> Result<(), ReportError> {
    for query in queries {
        let g = &query.graph;
        writeln!(writer, "#{}", query.id)?;
        writeln!(writer, "{}", direction(g.is_directed()))?;
        writeln!(writer, "{}", g.num_nodes())?;
        for source in 0..g.num_nodes() {
            for contact in g.out_contacts(source) {
                if written(g.is_directed(), source, contact.neighbor) {
                    writeln!(writer, "{source} {} {}", contact.neighbor, contact.time)?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write one CSV row per report, with a header row.
///
/// # Errors
///
/// Fails when encoding or the writer does.
pub fn write_reports<W: Write>(writer: W, reports: &[QueryReport]) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for report in reports {
        csv.serialize(report)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators() {
        let g = parse_graph("directed\n3\n0 1\n1,2\n\n2\t0\n".as_bytes()).unwrap();
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge(2, 0));
    }

    #[test]
    fn reports_bad_direction_with_line() {
        let err = parse_graph("sideways\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn reports_short_edge_line() {
        let err = parse_graph("undirected\n3\n0 1\n2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 4, .. }));
    }

    #[test]
    fn reports_out_of_range_node() {
        let err = parse_graph("directed\n2\n0 5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Graph(GraphError::NodeOutOfRange { node: 5, num_nodes: 2 })));
    }

    #[test]
    fn temporal_names_are_remapped_in_order() {
        let g = parse_temporal_graph("directed\n3\nalice bob 4\nbob carol 9\n".as_bytes()).unwrap();
        assert_eq!(g.contact(0, 1).map(|c| c.time), Some(4));
        assert_eq!(g.contact(1, 2).map(|c| c.time), Some(9));
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn query_blocks_split_on_headers() {
        let text = "#tri\nundirected\n3\n0 1\n1 2\n2 0\n#\ndirected\n2\n0 1\n";
        let queries = parse_queries(text.as_bytes()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].id, "tri");
        assert_eq!(queries[0].graph.num_edges(), 3);
        assert_eq!(queries[1].id, "q1");
    }

    #[test]
    fn query_file_must_start_with_header() {
        assert!(parse_queries("directed\n2\n".as_bytes()).is_err());
    }
}
