mod account;
mod league;
mod match_v5;
mod summoner;
