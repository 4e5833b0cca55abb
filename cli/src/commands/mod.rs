mod helpers;
mod item;

pub(crate) use item::{cmd_add, cmd_list, cmd_update};
