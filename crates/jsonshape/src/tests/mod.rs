
mod decode_good;
