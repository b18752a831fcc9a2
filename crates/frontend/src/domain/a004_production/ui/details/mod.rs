mod view_model;
