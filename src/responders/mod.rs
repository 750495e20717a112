mod pingpong;
mod salmon;
mod stage;

pub use pingpong::PingPongResponder;
pub use salmon::SalmonResponder;
pub use stage::StageResponder;
