pub use self::greedy::Greedy;

mod greedy;
