use std::{collections::VecDeque, io::Write, sync::{Arc, RwLock}};

/// Channel used by `READ` and `WRITE`.
pub trait ConsoleIO {
    /// Blocks until one line of input is available.
    fn read_input(&self, prompt: &str) -> std::io::Result<String>;

    fn write_output(&self, line: &str) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct StdConsoleIO;

impl ConsoleIO for StdConsoleIO {
    fn read_input(&self, prompt: &str) -> std::io::Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut buf = String::new();

        if std::io::stdin().read_line(&mut buf)? == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }

        Ok(buf)
    }

    fn write_output(&self, line: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{line}")
    }
}

/// Feeds scripted input lines and records every output line.
#[derive(Debug, Default, Clone)]
pub struct VectorConsoleIO {
    pub inputs: Arc<RwLock<VecDeque<String>>>,
    pub outputs: Arc<RwLock<Vec<String>>>,
}

impl VectorConsoleIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = Self::default();
        console.push_inputs(inputs);

        console
    }

    pub fn push_inputs<I, S>(&self, inputs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = self.inputs.write().expect("Input lock poisoned");
        queue.extend(inputs.into_iter().map(Into::into));
    }

    pub fn take_outputs(&self) -> Vec<String> {
        let mut outputs = self.outputs_lock();
        std::mem::take(&mut *outputs)
    }

    pub fn outputs(&self) -> Vec<String> {
        self.outputs.read().expect("Output lock poisoned").clone()
    }

    fn outputs_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.outputs.write().expect("Output lock poisoned")
    }
}

impl ConsoleIO for VectorConsoleIO {
    fn read_input(&self, _prompt: &str) -> std::io::Result<String> {
        let mut inputs = self.inputs.write().expect("Input lock poisoned");

        inputs.pop_front()
            .ok_or_else(|| std::io::ErrorKind::UnexpectedEof.into())
    }

    fn write_output(&self, line: &str) -> std::io::Result<()> {
        self.outputs_lock().push(line.to_string());

        Ok(())
    }
}
