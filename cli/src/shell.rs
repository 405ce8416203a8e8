//! Interactive prompt loop over a built index.

use anyhow::Result;
use larder_core::{InvertedIndex, RankOrder};
use std::io::{BufRead, Write};
use std::time::Instant;

const ORDERING_PROMPT: &str = "Ordering? [N] - Normal, [S] - Simple, [H] - Healthy";
const COUNT_PROMPT: &str = "Max amount of searches?";
const QUERY_PROMPT: &str = "SEARCH TERM";

/// Print the titles of the best `count` matches followed by the search time.
pub fn print_results<W: Write>(
    index: &InvertedIndex,
    query: &str,
    order: RankOrder,
    count: usize,
    out: &mut W,
) -> Result<()> {
    let start = Instant::now();
    let hits = index.search_ranked(query, order, count);
    let elapsed = start.elapsed();
    for hit in &hits {
        writeln!(out, "{}", hit.recipe.title)?;
    }
    writeln!(out)?;
    writeln!(out, "Search Time: {:.6}", elapsed.as_secs_f64())?;
    writeln!(out)?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Map the prompt's single-letter choices, in either case, to an ordering.
fn order_from_letter(choice: &str) -> Option<RankOrder> {
    match choice.to_ascii_lowercase().as_str() {
        "n" => Some(RankOrder::Relevance),
        "s" => Some(RankOrder::Simple),
        "h" => Some(RankOrder::Healthy),
        _ => None,
    }
}

fn prompt_order<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<RankOrder>> {
    loop {
        writeln!(out, "{ORDERING_PROMPT}")?;
        let Some(line) = read_line(input)? else { return Ok(None) };
        if let Some(order) = order_from_letter(&line) {
            return Ok(Some(order));
        }
    }
}

fn prompt_count<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<usize>> {
    loop {
        writeln!(out, "{COUNT_PROMPT}")?;
        let Some(line) = read_line(input)? else { return Ok(None) };
        match line.parse() {
            Ok(count) => return Ok(Some(count)),
            Err(_) => writeln!(out, "Not a valid integer\n")?,
        }
    }
}

/// Run the prompt loop until `input` is exhausted. A blank query returns to the ordering prompt.
pub fn run<R: BufRead, W: Write>(index: &InvertedIndex, mut input: R, out: &mut W) -> Result<()> {
    loop {
        let Some(order) = prompt_order(&mut input, out)? else { return Ok(()) };
        let Some(count) = prompt_count(&mut input, out)? else { return Ok(()) };
        tracing::debug!(%order, count, "shell settings");
        loop {
            writeln!(out, "{QUERY_PROMPT}")?;
            let Some(query) = read_line(&mut input)? else { return Ok(()) };
            if query.is_empty() {
                break;
            }
            writeln!(out)?;
            print_results(index, &query, order, count, out)?;
        }
    }
}
