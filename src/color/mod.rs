mod order;

pub use order::ChannelOrder;
use smart_leds::RGB8;

pub type Rgb = RGB8;
