use slog::{Drain, Level, Logger, KV};

pub struct TermLogFormat<D>
where
    D: slog_term::Decorator,
{
    decorator: D,
}

impl<D: slog_term::Decorator> TermLogFormat<D> {
    pub fn new(decorator: D) -> TermLogFormat<D> {
        TermLogFormat { decorator }
    }
}

impl<D: slog_term::Decorator> slog::Drain for TermLogFormat<D> {
    type Ok = ();
    type Err = std::io::Error;

    fn log(
        &self,
        record: &slog::Record<'_>,
        values: &slog::OwnedKVList,
    ) -> std::result::Result<Self::Ok, Self::Err> {
        self.decorator.with_record(record, values, |decorator| {
            if record.level() <= Level::Warning {
                decorator.start_level()?;
                write!(decorator, "{}: ", record.level().as_str())?;
                decorator.start_whitespace()?;
            }

            decorator.start_msg()?;
            write!(decorator, "{}", record.msg())?;

            // key-value pairs only when debugging
            if record.level() >= Level::Debug {
                let mut serializer = KvSerializer(&mut *decorator);
                record.kv().serialize(record, &mut serializer)?;
                values.serialize(record, &mut serializer)?;
            }

            decorator.start_whitespace()?;
            writeln!(decorator)?;

            decorator.flush()?;
            Ok(())
        })
    }
}

struct KvSerializer<'a>(&'a mut dyn slog_term::RecordDecorator);

impl slog::Serializer for KvSerializer<'_> {
    fn emit_arguments(&mut self, key: slog::Key, val: &std::fmt::Arguments<'_>) -> slog::Result {
        self.0.start_whitespace()?;
        write!(self.0, " ")?;
        self.0.start_key()?;
        write!(self.0, "{}", key)?;
        self.0.start_separator()?;
        write!(self.0, "=")?;
        self.0.start_value()?;
        write!(self.0, "{}", val)?;
        Ok(())
    }
}

/// Info by default; each `-v` lowers the level by one and each `-q` raises it.
pub(crate) fn log_level(verbose: u8, quiet: u8) -> Level {
    let level = 3 + i16::from(verbose) - i16::from(quiet);
    match level {
        ..=0 => Level::Critical,
        1 => Level::Error,
        2 => Level::Warning,
        3 => Level::Info,
        4 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Logs go to stderr, leaving stdout to command output.
pub(crate) fn new_logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = TermLogFormat::new(decorator).fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, slog::o!())
}
