mod propfind;
mod status;
