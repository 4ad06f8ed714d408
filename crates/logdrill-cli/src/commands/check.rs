//! The `logdrill check` command.

use anyhow::Result;

use logdrill_core::{validate, Direction, Query, TableIndex};

pub fn execute(index: u32, answer: String, reverse: bool) -> Result<()> {
    let index = TableIndex::new(index)?;
    let direction = if reverse {
        Direction::LogToArgument
    } else {
        Direction::ArgumentToLog
    };
    let query = Query::new(index, direction);

    if validate(answer.trim(), &query.correct_answer) {
        println!("correct");
    } else {
        println!("incorrect (expected {})", query.display_answer());
        std::process::exit(1);
    }

    Ok(())
}
