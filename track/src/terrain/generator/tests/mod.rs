mod outline_tests;
mod random_tests;
