pub mod a001_category;
pub mod a002_dish;
pub mod a003_setmeal;
