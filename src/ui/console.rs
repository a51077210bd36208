use crate::core::engine::CommandOutcome;
use crate::core::plan::Operation;
use crate::core::publish::PublishObserver;

/// Prints a header before each engine operation and a status line after it
pub struct ConsoleObserver {
  engine: String,
}

impl ConsoleObserver {
  pub fn new(engine: impl Into<String>) -> Self {
    Self { engine: engine.into() }
  }
}

impl PublishObserver for ConsoleObserver {
  fn step_started(&mut self, operation: &Operation) {
    match operation {
      Operation::Build { tag, .. } => println!("\n🐳 Building {}...", tag),
      Operation::Push { tag } => println!("\n📤 Pushing {}...", tag),
    }
    println!("   $ {} {}\n", self.engine, operation.args().join(" "));
  }

  fn step_finished(&mut self, operation: &Operation, outcome: &CommandOutcome) {
    if outcome.success() {
      println!("\n   ✅ {} succeeded", operation.name());
    } else {
      println!("\n   ❌ {} failed (exit code {})", operation.name(), outcome.exit_code);
    }
  }
}
