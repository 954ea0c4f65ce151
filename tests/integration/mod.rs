mod vakt;
