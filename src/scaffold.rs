//! Creation of per-day input files and stub modules, and the dispatch table
//! that wires them into a `match` on the day number.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};

/// Number of days generated when nothing else is configured.
pub const DEFAULT_DAY_COUNT: u32 = 25;

/// Largest day count that still fits the two-digit file naming.
pub const MAX_DAY_COUNT: u32 = 99;

/// Directory holding the per-day puzzle inputs.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Directory holding the per-day source modules.
pub const DEFAULT_SRC_DIR: &str = "src";

/// Body written into every stub module. No trailing newline.
pub const DEFAULT_STUB_TEMPLATE: &str = "pub fn run(_input: &str) { todo!() }";

/// A single puzzle day, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    /// Wrap a day number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// The unpadded day number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// The day number zero-padded to two digits (`1` becomes `01`).
    #[must_use]
    pub fn padded(self) -> String {
        format!("{:02}", self.0)
    }

    /// File name of the puzzle input, e.g. `01.txt`.
    #[must_use]
    pub fn input_file_name(self) -> String {
        format!("{}.txt", self.padded())
    }

    /// Rust module name of the solution, e.g. `day01`.
    #[must_use]
    pub fn module_name(self) -> String {
        format!("day{}", self.padded())
    }

    /// File name of the stub module, e.g. `day01.rs`.
    #[must_use]
    pub fn stub_file_name(self) -> String {
        format!("{}.rs", self.module_name())
    }

    /// The dispatch arm for this day, e.g. `1 => day01::run(&input),`.
    #[must_use]
    pub fn registration_line(self) -> String {
        format!("{self} => {}::run(&input),", self.module_name())
    }

    /// The module declaration for this day, e.g. `mod day01;`.
    #[must_use]
    pub fn module_declaration(self) -> String {
        format!("mod {};", self.module_name())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterate days `1..=count` in ascending order.
pub fn days(count: u32) -> impl Iterator<Item = Day> {
    (1..=count).map(Day::new)
}

/// Artifacts produced (or planned, in dry-run mode) for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DayArtifacts {
    /// The day these artifacts belong to.
    pub day: Day,
    /// Path of the empty input file.
    pub input_file: PathBuf,
    /// Path of the stub module.
    pub stub_file: PathBuf,
    /// Dispatch arm for the day.
    pub registration: String,
}

/// Outcome of a scaffolding pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    /// Whether files were only planned, not written.
    pub dry_run: bool,
    /// One entry per day, ascending.
    pub days: Vec<DayArtifacts>,
}

/// Writes input files and stub modules for a range of days.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    input_dir: PathBuf,
    src_dir: PathBuf,
    day_count: u32,
    stub_template: String,
    dry_run: bool,
}

impl Scaffolder {
    /// Build a scaffolder writing into `input_dir` and `src_dir`.
    ///
    /// Neither directory is created; both must exist when [`Self::scaffold`]
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::DayCount`] when the configured day count is
    /// zero or exceeds [`MAX_DAY_COUNT`].
    pub fn new(
        input_dir: impl Into<PathBuf>,
        src_dir: impl Into<PathBuf>,
        config: &ScaffoldConfig,
    ) -> Result<Self> {
        if !(1..=MAX_DAY_COUNT).contains(&config.day_count) {
            return Err(ScaffoldError::DayCount(config.day_count));
        }

        Ok(Self {
            input_dir: input_dir.into(),
            src_dir: src_dir.into(),
            day_count: config.day_count,
            stub_template: config.stub_template.clone(),
            dry_run: false,
        })
    }

    /// Only log the files that would be written.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Days covered by this scaffolder, ascending.
    pub fn days(&self) -> impl Iterator<Item = Day> {
        days(self.day_count)
    }

    fn input_path(&self, day: Day) -> PathBuf {
        self.input_dir.join(day.input_file_name())
    }

    fn stub_path(&self, day: Day) -> PathBuf {
        self.src_dir.join(day.stub_file_name())
    }

    /// Create every input file and stub module, truncating existing ones.
    ///
    /// For each day the input file is written before its stub. The first
    /// failure aborts the pass; files written before it stay on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Input`] or [`ScaffoldError::Stub`] when a file
    /// cannot be created or written.
    pub fn scaffold(&self) -> Result<ScaffoldReport> {
        let mut entries = Vec::new();

        for day in self.days() {
            let input_file = self.input_path(day);
            let stub_file = self.stub_path(day);

            if self.dry_run {
                log::info!(
                    "dry-run: would create {} and {}",
                    input_file.display(),
                    stub_file.display()
                );
            } else {
                fs::write(&input_file, b"").map_err(|source| ScaffoldError::Input {
                    path: input_file.clone(),
                    source,
                })?;
                log::debug!("created {}", input_file.display());

                fs::write(&stub_file, self.stub_template.as_bytes()).map_err(|source| {
                    ScaffoldError::Stub {
                        path: stub_file.clone(),
                        source,
                    }
                })?;
                log::debug!("created {}", stub_file.display());
            }

            entries.push(DayArtifacts {
                day,
                input_file,
                stub_file,
                registration: day.registration_line(),
            });
        }

        if !self.dry_run {
            log::info!(
                "scaffolded {} days into {} and {}",
                self.day_count,
                self.input_dir.display(),
                self.src_dir.display()
            );
        }

        Ok(ScaffoldReport {
            dry_run: self.dry_run,
            days: entries,
        })
    }

    /// Write one dispatch arm per day, each followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Output`] if the sink rejects a write.
    pub fn write_registration_table<W: Write>(&self, out: &mut W) -> Result<()> {
        for day in self.days() {
            writeln!(out, "{}", day.registration_line())?;
        }
        Ok(())
    }

    /// Write one `mod dayNN;` declaration per day.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Output`] if the sink rejects a write.
    pub fn write_module_declarations<W: Write>(&self, out: &mut W) -> Result<()> {
        for day in self.days() {
            writeln!(out, "{}", day.module_declaration())?;
        }
        Ok(())
    }

    /// Scaffold every day, then write the registration table to `out`.
    ///
    /// Nothing reaches `out` unless all files were created.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::scaffold`] or
    /// [`Self::write_registration_table`].
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ScaffoldReport> {
        let report = self.scaffold()?;
        self.write_registration_table(out)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("input")).expect("create input dir");
        fs::create_dir(dir.path().join("src")).expect("create src dir");
        dir
    }

    fn scaffolder(root: &Path) -> Scaffolder {
        Scaffolder::new(
            root.join("input"),
            root.join("src"),
            &ScaffoldConfig::default(),
        )
        .expect("default config is valid")
    }

    fn expected_table() -> String {
        (1..=25)
            .map(|i| format!("{i} => day{i:02}::run(&input),\n"))
            .collect()
    }

    #[test]
    fn day_formats_padded_and_unpadded() {
        let first = Day::new(1);
        assert_eq!(first.padded(), "01");
        assert_eq!(first.input_file_name(), "01.txt");
        assert_eq!(first.stub_file_name(), "day01.rs");
        assert_eq!(first.registration_line(), "1 => day01::run(&input),");
        assert_eq!(first.module_declaration(), "mod day01;");

        let last = Day::new(25);
        assert_eq!(last.padded(), "25");
        assert_eq!(last.registration_line(), "25 => day25::run(&input),");
    }

    #[test]
    fn days_cover_inclusive_range() {
        let numbers: Vec<u32> = days(25).map(Day::number).collect();
        assert_eq!(numbers.first(), Some(&1));
        assert_eq!(numbers.last(), Some(&25));
        assert_eq!(numbers.len(), 25);
    }

    #[test]
    fn scaffold_creates_empty_inputs_and_stubs() {
        let dir = workspace();
        let report = scaffolder(dir.path()).scaffold().expect("scaffold");

        assert_eq!(report.days.len(), 25);
        assert!(!report.dry_run);
        for i in 1..=25 {
            let input = dir.path().join(format!("input/{i:02}.txt"));
            let stub = dir.path().join(format!("src/day{i:02}.rs"));
            assert_eq!(fs::metadata(&input).expect("input exists").len(), 0);
            assert_eq!(
                fs::read_to_string(&stub).expect("stub exists"),
                DEFAULT_STUB_TEMPLATE
            );
        }
    }

    #[test]
    fn scaffold_stays_within_range() {
        let dir = workspace();
        scaffolder(dir.path()).scaffold().expect("scaffold");

        assert!(!dir.path().join("input/00.txt").exists());
        assert!(!dir.path().join("input/26.txt").exists());
        assert!(!dir.path().join("src/day00.rs").exists());
        assert!(!dir.path().join("src/day26.rs").exists());
        assert_eq!(fs::read_dir(dir.path().join("input")).expect("read").count(), 25);
        assert_eq!(fs::read_dir(dir.path().join("src")).expect("read").count(), 25);
    }

    #[test]
    fn rerun_truncates_existing_files() {
        let dir = workspace();
        let scaffolder = scaffolder(dir.path());
        scaffolder.scaffold().expect("first run");

        fs::write(dir.path().join("input/03.txt"), "puzzle input").expect("seed input");
        fs::write(dir.path().join("src/day03.rs"), "fn solved() {}\n").expect("seed stub");

        scaffolder.scaffold().expect("second run");

        assert_eq!(
            fs::metadata(dir.path().join("input/03.txt")).expect("input").len(),
            0
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("src/day03.rs")).expect("stub"),
            DEFAULT_STUB_TEMPLATE
        );
    }

    #[test]
    fn run_prints_table_after_scaffolding() {
        let dir = workspace();
        let mut out = Vec::new();
        let report = scaffolder(dir.path()).run(&mut out).expect("run");

        assert_eq!(String::from_utf8(out).expect("utf8"), expected_table());
        assert_eq!(report.days[0].registration, "1 => day01::run(&input),");
    }

    #[test]
    fn missing_src_dir_fails_after_first_input() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("input")).expect("create input dir");

        let mut out = Vec::new();
        let err = scaffolder(dir.path())
            .run(&mut out)
            .expect_err("src dir is missing");

        match err {
            ScaffoldError::Stub { path, .. } => {
                assert_eq!(path, dir.path().join("src/day01.rs"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(out.is_empty());
        assert!(dir.path().join("input/01.txt").exists());
        assert!(!dir.path().join("input/02.txt").exists());
    }

    #[test]
    fn missing_input_dir_fails_before_any_stub() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("src")).expect("create src dir");

        let err = scaffolder(dir.path())
            .scaffold()
            .expect_err("input dir is missing");

        assert!(matches!(err, ScaffoldError::Input { .. }));
        assert!(!dir.path().join("src/day01.rs").exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = workspace();
        let report = scaffolder(dir.path())
            .with_dry_run(true)
            .scaffold()
            .expect("dry run");

        assert!(report.dry_run);
        assert_eq!(report.days.len(), 25);
        assert_eq!(fs::read_dir(dir.path().join("input")).expect("read").count(), 0);
        assert_eq!(fs::read_dir(dir.path().join("src")).expect("read").count(), 0);
    }

    #[test]
    fn day_count_is_validated() {
        for day_count in [0, MAX_DAY_COUNT + 1] {
            let config = ScaffoldConfig {
                day_count,
                ..ScaffoldConfig::default()
            };
            let err = Scaffolder::new("input", "src", &config).expect_err("out of range");
            assert!(matches!(err, ScaffoldError::DayCount(n) if n == day_count));
        }
    }

    #[test]
    fn custom_count_and_template() {
        let dir = workspace();
        let config = ScaffoldConfig {
            day_count: 12,
            stub_template: "pub fn run(input: &str) {}\n".to_string(),
            ..ScaffoldConfig::default()
        };
        let scaffolder =
            Scaffolder::new(dir.path().join("input"), dir.path().join("src"), &config)
                .expect("valid config");

        let mut out = Vec::new();
        scaffolder.run(&mut out).expect("run");

        let table = String::from_utf8(out).expect("utf8");
        assert_eq!(table.lines().count(), 12);
        assert_eq!(table.lines().last(), Some("12 => day12::run(&input),"));
        assert_eq!(
            fs::read_to_string(dir.path().join("src/day12.rs")).expect("stub"),
            "pub fn run(input: &str) {}\n"
        );
        assert!(!dir.path().join("src/day13.rs").exists());
    }

    #[test]
    fn module_declarations_follow_day_order() {
        let config = ScaffoldConfig {
            day_count: 3,
            ..ScaffoldConfig::default()
        };
        let scaffolder = Scaffolder::new("input", "src", &config).expect("valid config");

        let mut out = Vec::new();
        scaffolder
            .write_module_declarations(&mut out)
            .expect("write declarations");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "mod day01;\nmod day02;\nmod day03;\n"
        );
    }
}
