mod direction_tester;
mod independence;

pub use direction_tester::IDirectionTester;
pub use independence::IIndependenceTest;
