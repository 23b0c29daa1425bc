//! Interactive profile package selection.

use std::io::{BufRead, Write};

use mopro::{MoproError, model::Package};

/// Print the candidates as an indexed table and read the chosen index.
///
/// # Errors
///
/// Returns [`MoproError::ProfilePackageNotFound`] when the answer is not a
/// listed index, and [`MoproError::Io`] when the terminal cannot be used.
pub fn prompt_for_package<'p, R, W>(
    candidates: &[&'p Package],
    mut input: R,
    mut output: W,
) -> Result<&'p Package, MoproError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Several profile packages were found:")?;
    writeln!(output, "{:>5}  Name", "Index")?;
    for (index, package) in candidates.iter().enumerate() {
        writeln!(output, "{index:>5}  {}", package.name())?;
    }
    write!(output, "Select a profile package: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();

    answer
        .parse::<usize>()
        .ok()
        .and_then(|index| candidates.get(index).copied())
        .ok_or_else(|| MoproError::ProfilePackageNotFound {
            name: answer.to_string(),
        })
}
