//! Matching compiler log messages back to shader source lines.

use prelude_plus::*;

/// Extracts `(line, message)` pairs from log lines shaped like
/// `ERROR: 0:12: 'foo' : undeclared identifier`.
pub fn parse_errors(log: &str) -> Vec<(usize, String)> {
  log
    .lines()
    .filter_map(|line| {
      let rest = line.trim().strip_prefix("ERROR:")?;
      let mut parts = rest.splitn(3, ':');
      let _file = parts.next()?;
      let line_number = parts.next()?.trim().parse::<usize>().ok()?;
      let message = parts.next().unwrap_or("").trim().to_owned();
      Some((line_number, message))
    })
    .collect()
}

/// Numbers every line of `source` and puts the matching errors from `log`
/// below the lines they refer to. Errors which can't be placed are appended
/// verbatim.
pub fn annotate_source(source: &str, log: &str) -> String {
  let errors = parse_errors(log);
  let line_count = source.lines().count();
  let width = line_count.to_string().len();

  let mut out = String::new();
  for (i, line) in source.lines().enumerate() {
    let line_number = i + 1;
    out.push_str(&format!("{:>width$}: {}\n", line_number, line, width = width));
    for (_, message) in errors.iter().filter(|(n, _)| *n == line_number) {
      out.push_str(&format!("{:>width$}  ^^^ ERROR: {}\n", "", message, width = width));
    }
  }
  for (line_number, message) in errors.iter().filter(|(n, _)| *n == 0 || *n > line_count) {
    out.push_str(&format!("ERROR: {}: {}\n", line_number, message));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn places_errors_under_their_lines() {
    let source = "void main() {\n  gl_Position = foo;\n}";
    let log = "ERROR: 0:2: 'foo' : undeclared identifier\nERROR: 1 compilation errors.";
    assert_eq!(parse_errors(log), vec![(2, "'foo' : undeclared identifier".to_owned())]);

    let annotated = annotate_source(source, log);
    let lines: Vec<&str> = annotated.lines().collect();
    assert_eq!(lines[0], "1: void main() {");
    assert_eq!(lines[1], "2:   gl_Position = foo;");
    assert_eq!(lines[2], "   ^^^ ERROR: 'foo' : undeclared identifier");
    assert_eq!(lines[3], "3: }");
  }
}
